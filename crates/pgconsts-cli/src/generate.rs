use crate::cli::GenerateArgs;
use crate::config::ProjectConfig;
use crate::write::{WriteOptions, emit};
use pgconsts::{DEFAULT_PACKAGE, GenerateOptions, RustFormatter, TableAllowlist};
use std::path::{Path, PathBuf};

/// Fully resolved settings for one run: flags, then config, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `-` reads stdin.
    pub input: PathBuf,
    pub package: String,
    pub tables: TableAllowlist,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub check: bool,
}

impl Settings {
    pub fn resolve(args: GenerateArgs, project: Option<&ProjectConfig>) -> anyhow::Result<Self> {
        let file = project.map(|p| &p.file);
        let from_config = |v: Option<&String>| -> Option<PathBuf> {
            let (project, v) = (project?, v?);
            Some(project.resolve_path(v))
        };

        let input = args
            .input
            .or_else(|| from_config(file.and_then(|f| f.input.as_ref())))
            .ok_or_else(|| anyhow::anyhow!("missing SQL file argument (see --help)"))?;

        let package = args
            .package
            .or_else(|| file.and_then(|f| f.package.clone()))
            .unwrap_or_else(|| DEFAULT_PACKAGE.to_string());

        let tables = args
            .tables
            .or_else(|| file.map(|f| f.tables.iter().cloned().collect()))
            .unwrap_or_default();

        let template = args
            .template
            .or_else(|| from_config(file.and_then(|f| f.template.as_ref())));

        let output = args
            .output
            .or_else(|| from_config(file.and_then(|f| f.output.as_ref())));

        if args.check && output.is_none() {
            anyhow::bail!("--check requires --output (or `output` in the config file)");
        }

        Ok(Self {
            input,
            package,
            tables,
            template,
            output,
            check: args.check,
        })
    }
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let project = args
        .config
        .as_deref()
        .map(ProjectConfig::load)
        .transpose()?;
    let settings = Settings::resolve(args, project.as_ref())?;
    tracing::debug!(?settings, "resolved settings");

    let sql = read_input(&settings.input)?;
    let template = settings
        .template
        .as_deref()
        .map(|p| {
            std::fs::read_to_string(p)
                .map_err(|e| anyhow::anyhow!("failed to read template {}: {e}", p.display()))
        })
        .transpose()?;

    let options = GenerateOptions {
        package: settings.package.clone(),
        allowlist: settings.tables.clone(),
        template,
    };

    let generated = match pgconsts::generate_source(&sql, &options, &RustFormatter) {
        Ok(generated) => generated,
        Err(e) => {
            if let Some(raw) = e.raw_output() {
                eprintln!("{raw}");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        tables = generated.table_count,
        skipped = generated.diagnostics.len(),
        "generated constants"
    );

    emit(
        &generated.code,
        settings.output.as_deref(),
        WriteOptions {
            check: settings.check,
        },
    )?;
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin())
            .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"));
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;

    fn project() -> ProjectConfig {
        ProjectConfig {
            config_dir: PathBuf::from("conf"),
            file: ConfigFile {
                input: Some("schema.sql".to_string()),
                package: Some("db".to_string()),
                tables: vec!["users".to_string()],
                template: Some("t.rs.j2".to_string()),
                output: Some("out.rs".to_string()),
            },
        }
    }

    #[test]
    fn defaults_without_config() {
        let s = Settings::resolve(
            GenerateArgs {
                input: Some(PathBuf::from("schema.sql")),
                ..GenerateArgs::default()
            },
            None,
        )
        .unwrap();

        assert_eq!(s.input, PathBuf::from("schema.sql"));
        assert_eq!(s.package, "models");
        assert_eq!(s.tables, TableAllowlist::all());
        assert_eq!(s.template, None);
        assert_eq!(s.output, None);
        assert!(!s.check);
    }

    #[test]
    fn config_fills_missing_flags_relative_to_config_dir() {
        let s = Settings::resolve(GenerateArgs::default(), Some(&project())).unwrap();

        assert_eq!(s.input, PathBuf::from("conf/schema.sql"));
        assert_eq!(s.package, "db");
        assert_eq!(s.tables, TableAllowlist::from_csv("users"));
        assert_eq!(s.template, Some(PathBuf::from("conf/t.rs.j2")));
        assert_eq!(s.output, Some(PathBuf::from("conf/out.rs")));
    }

    #[test]
    fn flags_override_config() {
        let s = Settings::resolve(
            GenerateArgs {
                input: Some(PathBuf::from("other.sql")),
                package: Some("names".to_string()),
                tables: Some(TableAllowlist::from_csv("posts")),
                output: Some(PathBuf::from("names.rs")),
                ..GenerateArgs::default()
            },
            Some(&project()),
        )
        .unwrap();

        assert_eq!(s.input, PathBuf::from("other.sql"));
        assert_eq!(s.package, "names");
        assert_eq!(s.tables, TableAllowlist::from_csv("posts"));
        assert_eq!(s.template, Some(PathBuf::from("conf/t.rs.j2")));
        assert_eq!(s.output, Some(PathBuf::from("names.rs")));
    }

    #[test]
    fn input_is_required() {
        let err = Settings::resolve(GenerateArgs::default(), None).unwrap_err();
        assert!(err.to_string().contains("missing SQL file"));
    }

    #[test]
    fn check_requires_output() {
        let args = GenerateArgs {
            input: Some(PathBuf::from("schema.sql")),
            check: true,
            ..GenerateArgs::default()
        };
        assert!(Settings::resolve(args.clone(), None).is_err());
        assert!(Settings::resolve(args, Some(&project())).is_ok());
    }
}
