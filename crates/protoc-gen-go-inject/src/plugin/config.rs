use anyhow::bail;
use clap::Parser;
use go_inject_core::config::{DEFAULT_CLIENT_IMPORT, DEFAULT_DEF_IMPORT, GeneratorConfig, PathsMode};
use std::path::PathBuf;

/// Settings for the `protoc-gen-go-inject` binary.
///
/// protoc runs the plugin without arguments, so everything here has a default
/// and can be set through the environment instead. Parameters passed with
/// `--go-inject_opt` are applied on top of these per request.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "protoc-gen-go-inject",
    version,
    about = "A protoc plugin generating fx bindings for Go gRPC clients"
)]
pub struct CliArgs {
    /// Read the encoded `CodeGeneratorRequest` from this file instead of
    /// stdin.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write the encoded `CodeGeneratorResponse` to this file instead of
    /// stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Import path of the package providing `def.Server`.
    ///
    /// Environment variable: `GO_INJECT_DEF_IMPORT`
    #[arg(long, env = "GO_INJECT_DEF_IMPORT", default_value_t = String::from(DEFAULT_DEF_IMPORT))]
    pub def_import: String,

    /// Import path of the package providing `RegisterGRPCClientFactoryType`.
    ///
    /// Environment variable: `GO_INJECT_CLIENT_IMPORT`
    #[arg(long, env = "GO_INJECT_CLIENT_IMPORT", default_value_t = String::from(DEFAULT_CLIENT_IMPORT))]
    pub client_import: String,

    /// Output layout, `source_relative` or `import`.
    ///
    /// Environment variable: `GO_INJECT_PATHS`
    #[arg(long, env = "GO_INJECT_PATHS", default_value_t = String::from("source_relative"))]
    pub paths: String,
}

#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub generator: GeneratorConfig,
}

impl TryFrom<CliArgs> for PluginConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.def_import.trim().is_empty() {
            bail!("GO_INJECT_DEF_IMPORT must not be empty");
        }
        if args.client_import.trim().is_empty() {
            bail!("GO_INJECT_CLIENT_IMPORT must not be empty");
        }
        let paths: PathsMode = args.paths.parse()?;

        Ok(Self {
            input: args.input,
            output: args.output,
            generator: GeneratorConfig {
                paths,
                def_import: args.def_import,
                client_import: args.client_import,
            },
        })
    }
}
