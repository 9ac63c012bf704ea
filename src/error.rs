use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("unknown directive `{0}`")]
	UnknownDirective(String),

	#[error("directive `{0}` requires an argument, e.g. `{0}:click`")]
	MissingArgument(&'static str),

	#[error("invalid property path `{0}`")]
	InvalidPath(String),

	#[error("cannot read `{segment}` of {found} while resolving `{path}`")]
	NotAnObject {
		path: String,
		segment: String,
		found: &'static str,
	},

	#[error("property `{0}` is computed and cannot be assigned")]
	ReadOnly(String),

	#[error("unknown method `{0}`")]
	UnknownMethod(String),

	#[error("mount target `{0}` not found")]
	MountNotFound(String),

	#[error("data root must be an object, found {0}")]
	DataNotObject(&'static str),

	#[error("view model has been dropped")]
	Detached,

	#[error("invalid interpolation delimiters")]
	Delimiters(#[from] regex::Error),

	#[error("{0}")]
	Method(String),
}

impl Error {
	pub fn method(message: impl Into<String>) -> Self {
		Error::Method(message.into())
	}
}
