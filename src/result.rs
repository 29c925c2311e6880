extern crate anyhow;
extern crate chrono;
extern crate reqwest;
extern crate serde_json;
extern crate std;

pub type GreendashResult<T> = std::result::Result<T, GreendashError>;

#[derive(Debug)]
pub enum GreendashError {
    HttpError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    TimeParseError(chrono::ParseError),
    ChannelError(String),
    MiscError(String),
}

pub fn make_error(msg: &str) -> GreendashError {
    return GreendashError::MiscError(msg.to_string());
}

impl std::fmt::Display for GreendashError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            GreendashError::HttpError(ref err) => {
                return write!(f, "HTTP Error: {}", err);
            },
            GreendashError::IoError(ref err) => {
                return write!(f, "IO Error: {}", err);
            },
            GreendashError::JsonError(ref err) => {
                return write!(f, "JSON Error: {}", err);
            },
            GreendashError::TimeParseError(ref err) => {
                return write!(f, "Time Parse Error: {}", err);
            },
            GreendashError::ChannelError(ref msg) => {
                return write!(f, "Channel Error: {}", msg);
            },
            GreendashError::MiscError(ref msg) => {
                return write!(f, "Error: {}", msg);
            },
        }
    }
}

impl std::error::Error for GreendashError {}

impl From<reqwest::Error> for GreendashError {
    fn from(err: reqwest::Error) -> GreendashError {
        return GreendashError::HttpError(err);
    }
}

impl From<std::io::Error> for GreendashError {
    fn from(err: std::io::Error) -> GreendashError {
        return GreendashError::IoError(err);
    }
}

impl From<serde_json::Error> for GreendashError {
    fn from(err: serde_json::Error) -> GreendashError {
        return GreendashError::JsonError(err);
    }
}

impl From<chrono::ParseError> for GreendashError {
    fn from(err: chrono::ParseError) -> GreendashError {
        return GreendashError::TimeParseError(err);
    }
}

impl From<anyhow::Error> for GreendashError {
    fn from(err: anyhow::Error) -> GreendashError {
        return GreendashError::MiscError(format!("{:#}", err));
    }
}

impl<T> From<std::sync::mpsc::SendError<T>> for GreendashError {
    fn from(_: std::sync::mpsc::SendError<T>) -> GreendashError {
        return GreendashError::ChannelError("receiver hung up".to_string());
    }
}
