use {
    crate::*,
    log::debug,
    std::{
        cell::OnceCell,
        fmt::Display,
        fs::File,
        path::{Path, PathBuf},
        str::FromStr,
    },
};

/// An `.ini` config file on disk.
///
/// The file is parsed on the first lookup, and the parsed [`table`](struct.IniTable.html)
/// is cached for the lifetime of the object (or until [`reload`](#method.reload)).
#[derive(Debug)]
pub struct IniFile {
    path: PathBuf,
    options: IniOptions,
    table: OnceCell<IniTable>,
}

impl IniFile {
    /// Creates a new [`.ini file`](struct.IniFile.html) at `path`
    /// using default [`parsing options`](struct.IniOptions.html).
    /// Does not access the file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_options(path, Default::default())
    }

    pub fn with_options<P: Into<PathBuf>>(path: P, options: IniOptions) -> Self {
        Self {
            path: path.into(),
            options,
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the parsed table, parsing the file if it was not parsed yet.
    pub fn table(&self) -> Result<&IniTable, ConfigError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let table = self.parse()?;

        Ok(self.table.get_or_init(|| table))
    }

    /// Discards the cached table, if any, and parses the file again.
    pub fn reload(&mut self) -> Result<&IniTable, ConfigError> {
        self.table.take();
        self.table()
    }

    /// Returns the raw (maybe empty) string value at `key` in `section`.
    ///
    /// Returns [`SectionNotFound`](enum.ConfigError.html#variant.SectionNotFound) if `section` is not defined,
    /// or [`KeyNotFound`](enum.ConfigError.html#variant.KeyNotFound) with the keys defined in `section`
    /// if `key` is not.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.table()?.lookup(section, key)
    }

    pub fn get_string(&self, section: &str, key: &str) -> Result<String, ConfigError> {
        self.get(section, key).map(str::to_owned)
    }

    pub fn get_i64(&self, section: &str, key: &str) -> Result<i64, ConfigError> {
        self.get_as(section, key)
    }

    pub fn get_f64(&self, section: &str, key: &str) -> Result<f64, ConfigError> {
        self.get_as(section, key)
    }

    /// Returns the value at `key` in `section`, converted to `T` via its [`FromStr`] implementation.
    ///
    /// Returns [`Conversion`](enum.ConfigError.html#variant.Conversion) if the value is not a valid `T`.
    pub fn get_as<T>(&self, section: &str, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        convert(self.get(section, key)?)
    }

    /// Same as [`get`](#method.get), but the section and key are provided as a single `"section.key"` path,
    /// split on the first dot.
    pub fn get_path(&self, path: &str) -> Result<&str, ConfigError> {
        let (section, key) = split_path(path)?;
        self.get(section, key)
    }

    /// Same as [`get_as`](#method.get_as), but the section and key are provided as a single `"section.key"` path,
    /// split on the first dot.
    pub fn get_path_as<T>(&self, path: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        convert(self.get_path(path)?)
    }

    fn parse(&self) -> Result<IniTable, ConfigError> {
        debug!("parsing \"{}\"", self.path.display());

        // The file is closed when the parser is dropped at the end of the pass.
        let file = File::open(&self.path)?;

        IniParser::with_options(file, self.options).parse()
    }
}

fn convert<T>(value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse::<T>().map_err(|err| ConfigError::Conversion {
        value: value.to_owned(),
        target: std::any::type_name::<T>(),
        reason: err.to_string(),
    })
}

fn split_path(path: &str) -> Result<(&str, &str), ConfigError> {
    match path.split_once('.') {
        Some((section, key)) if !section.is_empty() && !key.is_empty() => Ok((section, key)),
        _ => Err(ConfigError::InvalidPath(path.to_owned())),
    }
}
