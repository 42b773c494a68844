use serde::Deserialize;
use std::path::{Path, PathBuf};

/// `pgconsts.toml`: optional defaults for a generation run.
///
/// ```toml
/// input = "db/schema.sql"
/// package = "tables"
/// tables = ["users", "posts"]
/// template = "templates/consts.rs.j2"
/// output = "src/db/tables.rs"
/// ```
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_dir: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config_dir = config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        let raw = std::fs::read_to_string(config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let mut file: ConfigFile = toml::from_str(&raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to parse config file {}: {e}",
                config_path.display()
            )
        })?;

        file.expand_env()?;
        file.validate()?;

        Ok(Self { config_dir, file })
    }

    pub fn resolve_path(&self, p: impl AsRef<Path>) -> PathBuf {
        let p = p.as_ref();
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.config_dir.join(p)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<String>,
    pub package: Option<String>,
    #[serde(default)]
    pub tables: Vec<String>,
    pub template: Option<String>,
    pub output: Option<String>,
}

impl ConfigFile {
    fn expand_env(&mut self) -> anyhow::Result<()> {
        for v in [
            &mut self.input,
            &mut self.package,
            &mut self.template,
            &mut self.output,
        ]
        .into_iter()
        .flatten()
        {
            *v = expand_env_vars(v)?;
        }

        for t in &mut self.tables {
            *t = expand_env_vars(t)?;
        }

        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(package) = &self.package {
            if package.trim().is_empty() {
                anyhow::bail!("package must not be empty");
            }
        }
        if self.tables.iter().any(|t| t.trim().is_empty()) {
            anyhow::bail!("tables must not contain empty names");
        }
        for (key, value) in [
            ("input", &self.input),
            ("template", &self.template),
            ("output", &self.output),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                anyhow::bail!("{key} must not be empty");
            }
        }
        Ok(())
    }
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
