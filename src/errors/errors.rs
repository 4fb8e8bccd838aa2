use std::fmt::Display;

use thiserror::Error;

use crate::Location;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    /// Fatal errors abort analysis instead of being counted.
    pub fn is_fatal(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::NestingTooDeep { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::SymbolRedeclared { .. } => "SymbolRedeclared",
            ErrorImpl::NonPositiveArrayDimension { .. } => "NonPositiveArrayDimension",
            ErrorImpl::UndeclaredSymbol { .. } => "UndeclaredSymbol",
            ErrorImpl::NonVariableSymbol { .. } => "NonVariableSymbol",
            ErrorImpl::NonFunctionSymbol { .. } => "NonFunctionSymbol",
            ErrorImpl::NonIntegerIndex => "NonIntegerIndex",
            ErrorImpl::OverSubscript { .. } => "OverSubscript",
            ErrorImpl::ArrayAssignment => "ArrayAssignment",
            ErrorImpl::AssignToConstant { .. } => "AssignToConstant",
            ErrorImpl::AssignToLoopVar => "AssignToLoopVar",
            ErrorImpl::IncompatibleAssignment { .. } => "IncompatibleAssignment",
            ErrorImpl::ReadNonScalar => "ReadNonScalar",
            ErrorImpl::ReadConstantOrLoopVar => "ReadConstantOrLoopVar",
            ErrorImpl::PrintNonScalar => "PrintNonScalar",
            ErrorImpl::NonBooleanCondition => "NonBooleanCondition",
            ErrorImpl::DecreasingLoopBounds => "DecreasingLoopBounds",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::ReturnFromVoid { .. } => "ReturnFromVoid",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::IncompatibleReturn { .. } => "IncompatibleReturn",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::IncompatibleArgument { .. } => "IncompatibleArgument",
            ErrorImpl::InvalidUnaryOperand { .. } => "InvalidUnaryOperand",
            ErrorImpl::InvalidBinaryOperands { .. } => "InvalidBinaryOperands",
        }
    }

    /// Hint printed under errors that stop the pipeline. Counted semantic
    /// errors are reported in the fixed diagnostic format and carry none.
    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Program nests deeper than {} levels, try raising --max-depth",
                limit
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("program nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("symbol '{name}' is redeclared")]
    SymbolRedeclared { name: String },
    #[error("'{name}' declared as an array with an index that is not greater than 0")]
    NonPositiveArrayDimension { name: String },
    #[error("use of undeclared symbol '{name}'")]
    UndeclaredSymbol { name: String },
    #[error("use of non-variable symbol '{name}'")]
    NonVariableSymbol { name: String },
    #[error("call of non-function symbol '{name}'")]
    NonFunctionSymbol { name: String },
    #[error("index of array reference must be an integer")]
    NonIntegerIndex,
    #[error("there is an over array subscript on '{name}'")]
    OverSubscript { name: String },
    #[error("array assignment is not allowed")]
    ArrayAssignment,
    #[error("cannot assign to variable '{name}' which is a constant")]
    AssignToConstant { name: String },
    #[error("the value of loop variable cannot be modified inside the loop body")]
    AssignToLoopVar,
    #[error("assigning to '{target}' from incompatible type '{value}'")]
    IncompatibleAssignment { target: String, value: String },
    #[error("variable reference of read statement must be scalar type")]
    ReadNonScalar,
    #[error("variable reference of read statement cannot be a constant or loop variable")]
    ReadConstantOrLoopVar,
    #[error("expression of print statement must be scalar type")]
    PrintNonScalar,
    #[error("the expression of condition must be boolean type")]
    NonBooleanCondition,
    #[error("the lower bound and upper bound of iteration count must be in the incremental order")]
    DecreasingLoopBounds,
    #[error("return statement is not allowed outside of a function")]
    ReturnOutsideFunction,
    #[error("procedure '{function}' should not return a value")]
    ReturnFromVoid { function: String },
    #[error("function '{function}' must return a value of type '{expected}'")]
    MissingReturnValue { function: String, expected: String },
    #[error("return '{value}' from a function with return type '{expected}'")]
    IncompatibleReturn { value: String, expected: String },
    #[error("too few/much arguments provided for function '{function}'")]
    ArgumentCountMismatch { function: String },
    #[error("incompatible type passing '{argument}' to parameter of type '{parameter}'")]
    IncompatibleArgument { argument: String, parameter: String },
    #[error("invalid operand to unary operator '{operator}' ('{operand}')")]
    InvalidUnaryOperand { operator: String, operand: String },
    #[error("invalid operands to binary operator '{operator}' ('{left}' and '{right}')")]
    InvalidBinaryOperands {
        operator: String,
        left: String,
        right: String,
    },
}
