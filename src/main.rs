use clap::Parser;
use credcache::cli::commands::{login::LoginArgs, register::RegisterArgs};
use credcache::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    credcache::logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Login {
            ref email,
            ref password,
            remember,
            forget,
        } => {
            let args = LoginArgs {
                email: email.as_deref(),
                password: password.as_deref(),
                remember,
                forget,
            };
            credcache::cli::commands::login::execute(&cli, args).await
        }
        Commands::Logout => credcache::cli::commands::logout::execute(&cli).await,
        Commands::Register {
            ref first_name,
            ref last_name,
            ref email,
            ref password,
            ref birth_date,
            ref phone,
            ref country,
            remember,
        } => {
            let args = RegisterArgs {
                first_name,
                last_name,
                email,
                password: password.as_deref(),
                birth_date: birth_date.as_deref(),
                phone: phone.as_deref(),
                country,
                remember,
            };
            credcache::cli::commands::register::execute(&cli, args).await
        }
        Commands::Status => credcache::cli::commands::status::execute(&cli).await,
        Commands::Version => credcache::cli::commands::version::execute(),
        Commands::Completions { shell } => credcache::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credcache::cli::output::error(&e.user_message());
        std::process::exit(1);
    }
}
