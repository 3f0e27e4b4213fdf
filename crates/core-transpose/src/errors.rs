use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum ConvertError {
    #[snafu(display("Serialize error: {source}"))]
    Serialize { source: serde_json::Error },

    #[snafu(display("Deserialize error: {source}"))]
    Deserialize { source: serde_json::Error },

    #[snafu(display("Expected an object, value serialized to {kind}"))]
    NotAnObject { kind: &'static str },
}

// Context selectors are public so entity descriptor impls in downstream
// crates can build `Incompatible` from their own write functions.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum FieldWriteError {
    #[snafu(display("No field named {field}"))]
    UnknownField { field: String },

    #[snafu(display("Incompatible value for field {field}: {source}"))]
    Incompatible {
        field: String,
        source: serde_json::Error,
    },
}
