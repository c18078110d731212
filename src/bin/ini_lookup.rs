use {
    clap::{Parser, ValueEnum},
    std::{path::PathBuf, process::ExitCode},
    streamini::*,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValueType {
    String,
    Int,
    Float,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DuplicateKeys {
    Last,
    First,
    Forbid,
}

impl From<DuplicateKeys> for IniDuplicateKeys {
    fn from(duplicate_keys: DuplicateKeys) -> Self {
        match duplicate_keys {
            DuplicateKeys::Last => IniDuplicateKeys::Last,
            DuplicateKeys::First => IniDuplicateKeys::First,
            DuplicateKeys::Forbid => IniDuplicateKeys::Forbid,
        }
    }
}

/// Looks up a value in an `.ini` config file.
#[derive(Parser, Debug)]
#[command(name = "ini-lookup", version)]
struct Args {
    /// Path to the `.ini` file.
    file: PathBuf,

    /// Value to look up, as `section.key`.
    path: String,

    /// Type to convert the value to.
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
    value_type: ValueType,

    /// Also treat `#` as a comment delimiter.
    #[arg(long)]
    hash_comments: bool,

    /// Duplicate key handling policy.
    #[arg(long, value_enum, default_value_t = DuplicateKeys::Last)]
    duplicate_keys: DuplicateKeys,

    /// Keep the last line even if it is not terminated by a new line.
    #[arg(long)]
    flush_at_eof: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, ConfigError> {
    let comments = if args.hash_comments {
        IniCommentDelimiter::Semicolon | IniCommentDelimiter::NumberSign
    } else {
        IniCommentDelimiter::Semicolon
    };

    let ini = IniFile::with_options(
        args.file.clone(),
        IniOptions {
            comments,
            duplicate_keys: args.duplicate_keys.into(),
            flush_at_eof: args.flush_at_eof,
        },
    );

    Ok(match args.value_type {
        ValueType::String => ini.get_path(&args.path)?.to_owned(),
        ValueType::Int => ini.get_path_as::<i64>(&args.path)?.to_string(),
        ValueType::Float => ini.get_path_as::<f64>(&args.path)?.to_string(),
    })
}
