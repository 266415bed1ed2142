//! Project file patcher
//!
//! The debugger reads its interpreter from
//! `settings.debug-configurations[0].osx.pythonPath`. Every object on that
//! path must already exist in the project; only `pythonPath` itself is
//! created when missing. Key order is preserved on save.

use crate::error::{ProjectError, Result};
use crate::utils::{expand_home, with_trailing_slash};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SETTINGS_KEY: &str = "settings";
pub const DEBUG_CONFIGURATIONS_KEY: &str = "debug-configurations";
pub const OSX_KEY: &str = "osx";
pub const PYTHON_PATH_KEY: &str = "pythonPath";

const INDENT: &[u8] = b"    ";

/// Interpreter inside `virtualenv`: `<virtualenv>/bin/python`
pub fn python_path_for(virtualenv: &Path) -> String {
    format!("{}bin/python", with_trailing_slash(&virtualenv.to_string_lossy()))
}

/// A parsed project file and where it came from
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    document: Value,
}

impl ProjectFile {
    /// Read and parse the project at `path` (a leading `~` is expanded)
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = expand_home(path);
        let contents = fs::read_to_string(&path)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
        let document = serde_json::from_str(&contents)?;
        debug!("Read project file {}", path.display());

        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Current `pythonPath` of the first debug configuration, if any
    pub fn python_path(&self) -> Option<&str> {
        self.document
            .get(SETTINGS_KEY)?
            .get(DEBUG_CONFIGURATIONS_KEY)?
            .get(0)?
            .get(OSX_KEY)?
            .get(PYTHON_PATH_KEY)?
            .as_str()
    }

    pub fn set_python_path(&mut self, python_path: &str) -> Result<()> {
        let file = self.path.display().to_string();
        let missing = |path: &str| ProjectError::missing_key(path, file.as_str());

        let settings = self
            .document
            .get_mut(SETTINGS_KEY)
            .ok_or_else(|| missing(SETTINGS_KEY))?;
        let configurations = settings
            .get_mut(DEBUG_CONFIGURATIONS_KEY)
            .ok_or_else(|| missing("settings.debug-configurations"))?;
        let first = configurations
            .get_mut(0)
            .ok_or_else(|| missing("settings.debug-configurations[0]"))?;
        let osx = first
            .get_mut(OSX_KEY)
            .ok_or_else(|| missing("settings.debug-configurations[0].osx"))?
            .as_object_mut()
            .ok_or_else(|| {
                ProjectError::not_an_object("settings.debug-configurations[0].osx", file.as_str())
            })?;

        osx.insert(PYTHON_PATH_KEY.to_string(), Value::String(python_path.to_string()));
        Ok(())
    }

    /// Point the debugger at the interpreter of `virtualenv` and return the
    /// interpreter path that was written
    pub fn set_virtualenv(&mut self, virtualenv: &Path) -> Result<String> {
        let python_path = python_path_for(virtualenv);
        self.set_python_path(&python_path)?;
        Ok(python_path)
    }

    /// Render the document with 4-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.document.serialize(&mut serializer)?;
        buf.push(b'\n');

        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    /// Write the document back to the file it was read from
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.to_pretty_string()?)?;
        debug!("Saved project file {}", self.path.display());
        Ok(())
    }
}

/// Read `project_file`, set its interpreter to the one in `virtualenv` and
/// save it. Returns the interpreter path written.
pub fn update_debugger_path(project_file: &Path, virtualenv: &Path) -> Result<String> {
    let mut project = ProjectFile::read(project_file)?;
    let python_path = project.set_virtualenv(virtualenv)?;
    project.save()?;

    info!(
        "Set {} in {} to {}",
        PYTHON_PATH_KEY,
        project.path().display(),
        python_path
    );
    Ok(python_path)
}
