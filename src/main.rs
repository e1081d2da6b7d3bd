//! Command-line interface for the language carousel service.
//!
//! `serve` starts the HTTP server; `render` produces a single carousel and
//! writes it to a file or standard output.

use std::{
    fs,
    io::{self, Write},
    net::IpAddr,
    path::{Path, PathBuf},
    process,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use lang_carousel::{
    API_BASE_URI_ENV, Error, IconRegistry, Profile, ServerSettings, ServiceSettings, TOKEN_ENV,
    output_io_error, render_carousel, server::run_server,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Render animated language carousels for GitHub profiles.
#[derive(Debug, Parser,)]
#[command(name = "lang-carousel", version, about = "Render animated language carousels")]
struct Cli
{
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging when RUST_LOG is not set.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Debug, Subcommand,)]
enum Command
{
    /// Serve carousels over HTTP.
    Serve(ServeArgs,),
    /// Render one carousel to a file or standard output.
    Render(RenderArgs,),
}

/// Options shared by every command that talks to GitHub.
#[derive(Debug, Args, Default,)]
struct GitHubArgs
{
    /// Token attached to outbound GitHub calls.
    #[arg(long = "github-token", env = TOKEN_ENV, hide_env_values = true)]
    github_token: Option<String,>,

    /// Alternative GitHub API root.
    #[arg(long = "api-base-uri", env = API_BASE_URI_ENV, value_name = "URL")]
    api_base_uri: Option<String,>,

    /// YAML document replacing the built-in icon registry.
    #[arg(long = "icons", value_name = "PATH")]
    icons: Option<PathBuf,>,
}

impl GitHubArgs
{
    fn into_settings(self,) -> ServiceSettings
    {
        ServiceSettings {
            github_token: self.github_token,
            api_base_uri: self.api_base_uri,
            icons_path:   self.icons,
        }
    }
}

#[derive(Debug, Args,)]
struct ServeArgs
{
    /// Address to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[command(flatten)]
    github: GitHubArgs,
}

#[derive(Debug, Args,)]
struct RenderArgs
{
    /// GitHub login whose repositories are aggregated.
    #[arg(long = "user", value_name = "USERNAME")]
    user: String,

    /// Presentation profile: compact, large, or full-width.
    #[arg(long = "profile", default_value = "compact")]
    profile: Profile,

    /// Destination file. Standard output when omitted.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,

    #[command(flatten)]
    github: GitHubArgs,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    let cli = Cli::parse();
    init_tracing(cli.verbose,);

    if let Err(error,) = run(cli.command,).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing(verbose: bool,)
{
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into(),),)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr,),)
        .init();
}

/// Executes the parsed command.
///
/// # Errors
///
/// Propagates configuration, aggregation, rendering, and server errors.
async fn run(command: Command,) -> Result<(), Error,>
{
    match command {
        Command::Serve(args,) => run_serve(args,).await,
        Command::Render(args,) => run_render(args,).await,
    }
}

async fn run_serve(args: ServeArgs,) -> Result<(), Error,>
{
    run_server(ServerSettings {
        host:    args.host,
        port:    args.port,
        service: args.github.into_settings(),
    },)
    .await
}

async fn run_render(args: RenderArgs,) -> Result<(), Error,>
{
    let settings = args.github.into_settings();
    let client = settings.github_client()?;
    let registry: IconRegistry = settings.icon_registry()?;

    let rendered = render_carousel(&client, &registry, &args.user, args.profile,).await?;

    match args.output {
        Some(path,) => {
            if let Some(parent,) = path.parent().filter(|parent| !parent.as_os_str().is_empty(),) {
                fs::create_dir_all(parent,).map_err(|source| output_io_error(&path, source,),)?;
            }
            fs::write(&path, rendered.body.as_bytes(),).map_err(|source| output_io_error(&path, source,),)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.body.as_bytes(),)
                .map_err(|source| output_io_error(Path::new("<stdout>",), source,),)
        }
    }
}
