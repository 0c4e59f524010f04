use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SigilError {
	#[error(transparent)]
	#[diagnostic(code(sigil::io_error))]
	Io(#[from] std::io::Error),

	#[error("missing token: `{0}`")]
	#[diagnostic(
		code(sigil::missing_token),
		help("add `{0}` to one of the supplied token maps, or disable `error_if_missing`")
	)]
	MissingToken(String),

	#[error("token `{0}` is not callable but received an argument list")]
	#[diagnostic(
		code(sigil::not_invocable),
		help("remove the parenthesised arguments, or map `{0}` to a function value")
	)]
	NotInvocable(String),

	#[error("token `{path}` failed during invocation: {reason}")]
	#[diagnostic(code(sigil::invocation))]
	Invocation { path: String, reason: String },

	#[error("token `{path}` resolved to a {kind}, which cannot be written as text")]
	#[diagnostic(
		code(sigil::unprintable),
		help("extend the path to reach a scalar value inside `{path}`")
	)]
	Unprintable { path: String, kind: &'static str },

	#[error("failed to load token map `{path}`: {reason}")]
	#[diagnostic(code(sigil::data_file))]
	DataFile { path: String, reason: String },

	#[error("unsupported token map format: `{0}`")]
	#[diagnostic(
		code(sigil::unsupported_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedDataFormat(String),

	#[error("unconvertible value in token map `{path}`: {value}")]
	#[diagnostic(
		code(sigil::unconvertible_value),
		help("token map values must be scalars, arrays of scalars, or nested tables")
	)]
	UnconvertibleValue { path: String, value: String },
}

pub type SigilResult<T> = Result<T, SigilError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
