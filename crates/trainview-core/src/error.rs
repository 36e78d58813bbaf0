use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("can't read file \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't parse json file \"{}\": {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("\"rasa_nlu_data\" is undefined in \"{}\"", .path.display())]
    Validation { path: PathBuf },

    #[error("can't find a training file, please try to specify it with the --source option")]
    NoFileFound,

    #[error("can't write file \"{}\": {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no source file is bound")]
    Unbound,

    #[error("a source file is already bound to \"{}\"", .path.display())]
    AlreadyBound { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, SourceError>;
