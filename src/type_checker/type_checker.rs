use log::{debug, trace};

use crate::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        expressions::VariableReferenceNode,
        statements::{
            AssignNode, CompoundStatementNode, ConditionNode, DeclarationNode, ForNode,
            FunctionNode, PrintNode, ProgramNode, ReadNode, ReturnNode, WhileNode,
        },
        types::{ScalarType, SymbolKind},
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
};

use super::symbol_table::SymbolTable;

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Print the symbol table every time a scope closes.
    pub dump_symbols_on_pop: bool,
    /// Bound on recursion, applied separately by each pass. The parser
    /// counts nested statement and expression rules; the analyzer counts
    /// nested tree nodes, so a left-leaning operator chain or a wrapped
    /// variable reference goes deeper here than it did while parsing.
    pub max_nesting_depth: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            dump_symbols_on_pop: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// How a sibling list reacts to a failing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPolicy {
    /// Stop at the first element reporting errors.
    StopAtFirstError,
    /// Analyze every element and sum their errors.
    ReportAll,
}

/// Semantic analyzer.
///
/// Walks the tree once, maintaining scopes in the symbol table, writing the
/// inferred types back into expression, variable reference and invocation
/// nodes, and reporting each error through the diagnostics sink. Every
/// `analyze_*` method returns the number of errors found beneath the node;
/// `Err` is reserved for fatal conditions that stop the walk.
pub struct Analyzer<'a> {
    pub(super) ast: &'a mut Ast,
    pub(super) symbols: &'a mut SymbolTable,
    diagnostics: &'a mut Diagnostics,
    config: AnalyzerConfig,
    current_function: Option<NodeId>,
    depth: usize,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        ast: &'a mut Ast,
        symbols: &'a mut SymbolTable,
        diagnostics: &'a mut Diagnostics,
        config: AnalyzerConfig,
    ) -> Self {
        symbols.enable_dump(config.dump_symbols_on_pop);
        Analyzer {
            ast,
            symbols,
            diagnostics,
            config,
            current_function: None,
            depth: 0,
        }
    }

    /// Analyzes the tree rooted at `root` and returns the total error count.
    pub fn analyze(&mut self, root: NodeId) -> Result<usize, Error> {
        let errors = self.visit(Some(root))?;
        debug!("analysis finished with {} errors", errors);
        Ok(errors)
    }

    pub fn visit(&mut self, node: Option<NodeId>) -> Result<usize, Error> {
        match node {
            Some(id) => self.visit_node(id),
            None => Ok(0),
        }
    }

    pub fn visit_list(&mut self, head: Option<NodeId>, policy: ListPolicy) -> Result<usize, Error> {
        let mut errors = 0;
        let mut current = head;

        while let Some(id) = current {
            let found = self.visit_node(id)?;
            errors += found;
            if found > 0 && policy == ListPolicy::StopAtFirstError {
                break;
            }
            current = self.ast.next(id);
        }

        Ok(errors)
    }

    fn visit_node(&mut self, id: NodeId) -> Result<usize, Error> {
        self.depth += 1;
        if self.depth > self.config.max_nesting_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.config.max_nesting_depth,
                },
                self.ast.location(id),
            ));
        }
        trace!("analyze node {:?} at {}", id, self.ast.location(id));

        let result = match self.ast.kind(id).clone() {
            NodeKind::Program(program) => self.analyze_program(id, program),
            NodeKind::Declaration(declaration) => self.analyze_declaration(id, declaration),
            NodeKind::Expression(expression) => self.analyze_expression(id, expression),
            NodeKind::CompoundStatement(compound) => self.analyze_compound(compound),
            NodeKind::Print(print) => self.analyze_print(print),
            NodeKind::VariableReference(reference) => self.analyze_variable_reference(id, reference),
            NodeKind::Assign(assign) => self.analyze_assign(id, assign),
            NodeKind::Read(read) => self.analyze_read(read),
            NodeKind::Condition(condition) => self.analyze_condition(condition),
            NodeKind::While(while_node) => self.analyze_while(while_node),
            NodeKind::Return(return_node) => self.analyze_return(id, return_node),
            NodeKind::For(for_node) => self.analyze_for(id, for_node),
            NodeKind::FunctionInvocation(invocation) => self.analyze_function_invocation(id, invocation),
            NodeKind::Function(function) => self.analyze_function(id, function),
            NodeKind::Literal(_)
            | NodeKind::Type(_)
            | NodeKind::Id(_)
            | NodeKind::IntValue(_)
            | NodeKind::Epsilon(_) => Ok(0),
        };

        self.depth -= 1;
        result
    }

    /// Records a semantic error located at `node`. Always accounts for one error.
    pub(super) fn report(&mut self, error: ErrorImpl, node: NodeId) -> usize {
        let error = Error::new(error, self.ast.location(node));
        debug!("{}: {}", error.get_error_name(), error);
        self.diagnostics.report(error);
        1
    }

    /// Runs `f` inside a fresh scope, closing it even when `f` fails.
    fn scoped<F>(&mut self, f: F) -> Result<usize, Error>
    where
        F: FnOnce(&mut Self) -> Result<usize, Error>,
    {
        self.symbols.push_scope();
        let result = f(self);
        self.symbols.pop_scope();
        result
    }

    fn analyze_program(&mut self, id: NodeId, program: ProgramNode) -> Result<usize, Error> {
        debug!("analyze program {}", program.name);

        self.scoped(|analyzer| {
            analyzer
                .symbols
                .insert(&program.name, SymbolKind::Program, Some(ScalarType::Void), "void", "", id);

            let mut errors = analyzer.visit_list(program.first_declaration, ListPolicy::ReportAll)?;
            errors += analyzer.visit_list(program.first_function, ListPolicy::ReportAll)?;
            errors += analyzer.visit(Some(program.body))?;
            Ok(errors)
        })
    }

    fn analyze_declaration(&mut self, _id: NodeId, declaration: DeclarationNode) -> Result<usize, Error> {
        let Some(type_node) = self.ast.type_node(declaration.type_node).cloned() else {
            return Ok(0);
        };
        let attribute = declaration
            .literal
            .and_then(|literal| self.ast.literal(literal))
            .map(|literal| literal.text.clone())
            .unwrap_or_default();

        let mut errors = 0;
        let ids: Vec<NodeId> = self.ast.siblings(Some(declaration.first_id)).collect();
        for &var in &ids {
            let name = self.ast.id_name(var).unwrap_or_default().to_string();

            let clashes = self.symbols.lookup(&name).is_some_and(|symbol| {
                Some(self.symbols.level(symbol)) == self.symbols.current_level()
                    || self.symbols.kind(symbol) == SymbolKind::LoopVar
            });
            if clashes {
                errors += self.report(ErrorImpl::SymbolRedeclared { name }, var);
                continue;
            }

            self.symbols.insert(
                &name,
                declaration.kind,
                Some(type_node.scalar),
                &type_node.type_string,
                &attribute,
                declaration.type_node,
            );
        }

        if self.ast.dimensions(declaration.type_node).iter().any(|&dim| dim <= 0) {
            let name = self.ast.id_name(declaration.first_id).unwrap_or_default().to_string();
            errors += self.report(ErrorImpl::NonPositiveArrayDimension { name }, declaration.first_id);
        }

        Ok(errors)
    }

    fn analyze_compound(&mut self, compound: CompoundStatementNode) -> Result<usize, Error> {
        self.scoped(|analyzer| {
            let mut errors = analyzer.visit_list(compound.first_declaration, ListPolicy::ReportAll)?;
            errors += analyzer.visit_list(compound.first_statement, ListPolicy::ReportAll)?;
            Ok(errors)
        })
    }

    fn analyze_print(&mut self, print: PrintNode) -> Result<usize, Error> {
        let errors = self.visit(Some(print.expression))?;
        if errors > 0 {
            return Ok(errors);
        }

        match self.ast.result_type(print.expression) {
            None | Some(ScalarType::Void) => Ok(self.report(ErrorImpl::PrintNonScalar, print.expression)),
            Some(_) => Ok(0),
        }
    }

    fn analyze_variable_reference(&mut self, id: NodeId, reference: VariableReferenceNode) -> Result<usize, Error> {
        let Some(symbol) = self.symbols.lookup(&reference.name) else {
            return Ok(self.report(ErrorImpl::UndeclaredSymbol { name: reference.name }, id));
        };
        if !self.symbols.kind(symbol).is_variable() {
            return Ok(self.report(ErrorImpl::NonVariableSymbol { name: reference.name }, id));
        }

        // Every index is checked, even after one of them fails.
        let mut errors = 0;
        let indices: Vec<NodeId> = self.ast.siblings(reference.first_index).collect();
        for index in indices {
            let found = self.visit(Some(index))?;
            if found > 0 {
                errors += found;
            } else if self.ast.result_type(index) != Some(ScalarType::Integer) {
                errors += self.report(ErrorImpl::NonIntegerIndex, index);
            }
        }
        if errors > 0 {
            return Ok(errors);
        }

        let declared = self.ast.dimensions(self.symbols.node(symbol)).len();
        let used = self.ast.list_length(reference.first_index);
        if used > declared {
            return Ok(self.report(ErrorImpl::OverSubscript { name: reference.name }, id));
        }

        let var_type = if used == declared {
            self.symbols.scalar_type(symbol)
        } else {
            None
        };
        if let Some(node) = self.ast.variable_reference_mut(id) {
            node.var_type = var_type;
        }
        Ok(0)
    }

    fn analyze_assign(&mut self, id: NodeId, assign: AssignNode) -> Result<usize, Error> {
        let errors = self.visit(Some(assign.variable))?;
        if errors > 0 {
            return Ok(errors);
        }

        let Some(reference) = self.ast.variable_reference(assign.variable).cloned() else {
            return Ok(0);
        };
        let Some(target) = reference.var_type else {
            return Ok(self.report(ErrorImpl::ArrayAssignment, assign.variable));
        };

        if let Some(symbol) = self.symbols.lookup(&reference.name) {
            match self.symbols.kind(symbol) {
                SymbolKind::Constant => {
                    return Ok(self.report(ErrorImpl::AssignToConstant { name: reference.name }, assign.variable));
                }
                SymbolKind::LoopVar => {
                    return Ok(self.report(ErrorImpl::AssignToLoopVar, assign.variable));
                }
                _ => {}
            }
        }

        let errors = self.visit(Some(assign.expression))?;
        if errors > 0 {
            return Ok(errors);
        }

        let Some(value) = self.ast.result_type(assign.expression) else {
            return Ok(self.report(ErrorImpl::ArrayAssignment, assign.expression));
        };
        if !value.coerces_to(target) {
            return Ok(self.report(
                ErrorImpl::IncompatibleAssignment {
                    target: target.to_string(),
                    value: value.to_string(),
                },
                id,
            ));
        }

        Ok(0)
    }

    fn analyze_read(&mut self, read: ReadNode) -> Result<usize, Error> {
        let errors = self.visit(Some(read.variable))?;
        if errors > 0 {
            return Ok(errors);
        }

        let Some(reference) = self.ast.variable_reference(read.variable).cloned() else {
            return Ok(0);
        };
        if reference.var_type.is_none() {
            return Ok(self.report(ErrorImpl::ReadNonScalar, read.variable));
        }

        let kind = self.symbols.lookup(&reference.name).map(|symbol| self.symbols.kind(symbol));
        if matches!(kind, Some(SymbolKind::Constant | SymbolKind::LoopVar)) {
            return Ok(self.report(ErrorImpl::ReadConstantOrLoopVar, read.variable));
        }

        Ok(0)
    }

    /// Checks a guard expression, reporting one error unless it is boolean.
    fn analyze_guard(&mut self, condition: NodeId) -> Result<usize, Error> {
        let errors = self.visit(Some(condition))?;
        if errors > 0 {
            return Ok(errors);
        }

        if self.ast.result_type(condition) != Some(ScalarType::Boolean) {
            return Ok(self.report(ErrorImpl::NonBooleanCondition, condition));
        }
        Ok(0)
    }

    fn analyze_condition(&mut self, condition: ConditionNode) -> Result<usize, Error> {
        let mut errors = self.analyze_guard(condition.condition)?;
        errors += self.visit(Some(condition.then_body))?;
        errors += self.visit(condition.else_body)?;
        Ok(errors)
    }

    fn analyze_while(&mut self, while_node: WhileNode) -> Result<usize, Error> {
        let mut errors = self.analyze_guard(while_node.condition)?;
        errors += self.visit(Some(while_node.body))?;
        Ok(errors)
    }

    fn analyze_for(&mut self, id: NodeId, for_node: ForNode) -> Result<usize, Error> {
        self.scoped(|analyzer| {
            let mut errors = 0;
            if for_node.start > for_node.end {
                errors += analyzer.report(ErrorImpl::DecreasingLoopBounds, id);
            }
            errors += analyzer.visit(Some(for_node.declaration))?;
            errors += analyzer.visit(Some(for_node.body))?;
            Ok(errors)
        })
    }

    fn analyze_return(&mut self, id: NodeId, return_node: ReturnNode) -> Result<usize, Error> {
        let Some((name, expected)) = self
            .current_function
            .and_then(|function| self.ast.function(function))
            .map(|function| (function.name.clone(), function.return_type))
        else {
            return Ok(self.report(ErrorImpl::ReturnOutsideFunction, id));
        };

        match (expected, return_node.expression) {
            (ScalarType::Void, None) => Ok(0),
            (ScalarType::Void, Some(_)) => Ok(self.report(ErrorImpl::ReturnFromVoid { function: name }, id)),
            (expected, None) => Ok(self.report(
                ErrorImpl::MissingReturnValue {
                    function: name,
                    expected: expected.to_string(),
                },
                id,
            )),
            (expected, Some(expression)) => {
                let errors = self.visit(Some(expression))?;
                if errors > 0 {
                    return Ok(errors);
                }

                match self.ast.result_type(expression) {
                    Some(value) if value.coerces_to(expected) => Ok(0),
                    _ => {
                        let value = self.operand_type_name(expression);
                        Ok(self.report(
                            ErrorImpl::IncompatibleReturn {
                                value,
                                expected: expected.to_string(),
                            },
                            expression,
                        ))
                    }
                }
            }
        }
    }

    fn analyze_function(&mut self, id: NodeId, function: FunctionNode) -> Result<usize, Error> {
        debug!("analyze function {}", function.name);
        let mut errors = 0;

        let redeclared = self
            .symbols
            .lookup(&function.name)
            .is_some_and(|symbol| Some(self.symbols.level(symbol)) == self.symbols.current_level());
        if redeclared {
            errors += self.report(ErrorImpl::SymbolRedeclared { name: function.name.clone() }, id);
        } else {
            self.symbols.insert(
                &function.name,
                SymbolKind::Function,
                Some(function.return_type),
                function.return_type.as_str(),
                &function.parameter_type_string,
                id,
            );
        }

        if let Some(body) = function.body {
            let enclosing = self.current_function.replace(id);
            let result = self.scoped(|analyzer| {
                let mut errors = analyzer.visit_list(function.first_parameter, ListPolicy::ReportAll)?;
                errors += analyzer.visit_list(Some(body), ListPolicy::ReportAll)?;
                Ok(errors)
            });
            self.current_function = enclosing;
            errors += result?;
        }

        Ok(errors)
    }
}
