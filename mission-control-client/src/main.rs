use clap::Parser;
use clap::Subcommand;
use mission_control_client::config::Config;
use mission_control_client::domain::astronaut_model::Astronaut;
use mission_control_client::domain::mission_model::Mission;
use mission_control_client::error::MissionControlError;
use mission_control_client::MissionControl;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "mission-control", about = "Administer astronauts and their missions")]
struct Cli {
    /// Base url of the mission control api.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Where the session token is kept between runs.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session token. Without --password the password
    /// is taken from MISSION_CONTROL_PASSWORD or asked for.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MISSION_CONTROL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an admin account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "MISSION_CONTROL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session token.
    Logout,
    #[command(subcommand)]
    Astronauts(AstronautCommand),
    #[command(subcommand)]
    Missions(MissionCommand),
}

#[derive(Subcommand)]
enum AstronautCommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MissionCommand {
    List {
        astronaut_id: i64,
    },
    Create {
        astronaut_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init_timed();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = Some(session_file);
    }

    let result = match MissionControl::from_config(&config) {
        Ok(app) => run(&app, cli.command).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        if let MissionControlError::Unauthorized = err {
            eprintln!("hint: run `mission-control login --email <email>` to log in again");
        }
        process::exit(1);
    }
}

async fn run(app: &MissionControl, command: Command) -> Result<(), MissionControlError> {
    match command {
        Command::Login { email, password } => {
            let password = password_or_prompt(password)?;
            app.auth.login(&email, &password).await?;
            println!("logged in");
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let user = app.auth.register(&name, &email, &password).await?;
            println!("registered {} <{}> with id {}", user.name, user.email, user.id);
        }
        Command::Logout => {
            app.auth.logout()?;
            println!("logged out");
        }
        Command::Astronauts(command) => run_astronauts(app, command).await?,
        Command::Missions(command) => run_missions(app, command).await?,
    }

    Ok(())
}

async fn run_astronauts(
    app: &MissionControl,
    command: AstronautCommand,
) -> Result<(), MissionControlError> {
    match command {
        AstronautCommand::List => {
            print_astronauts(&app.astronauts.list().await?);
        }
        AstronautCommand::Show { id } => {
            let astronaut = app.astronauts.get(id).await?;
            print_astronauts(std::slice::from_ref(&astronaut));
            println!();
            print_missions(&astronaut.missions);
        }
        AstronautCommand::Create { name, email } => {
            app.astronauts.create(&name, &email).await?;
            print_astronauts(&app.astronauts.list().await?);
        }
        AstronautCommand::Update { id, name, email } => {
            app.astronauts.update(id, &name, &email).await?;
            print_astronauts(&app.astronauts.list().await?);
        }
        AstronautCommand::Delete { id, yes } => {
            let question = format!("Delete astronaut {} and all of its missions?", id);
            if !yes && !confirm(&question, &mut io::stdin().lock(), &mut io::stdout())? {
                println!("aborted");
                return Ok(());
            }
            app.astronauts.delete(id).await?;
            print_astronauts(&app.astronauts.list().await?);
        }
    }

    Ok(())
}

async fn run_missions(
    app: &MissionControl,
    command: MissionCommand,
) -> Result<(), MissionControlError> {
    match command {
        MissionCommand::List { astronaut_id } => {
            print_missions(&app.missions.list_missions(astronaut_id).await?);
        }
        MissionCommand::Create {
            astronaut_id,
            title,
            description,
        } => {
            let mission = app
                .missions
                .create_mission(astronaut_id, &title, description.as_deref())
                .await?;
            print_missions(&[mission]);
        }
    }

    Ok(())
}

fn ask(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<String, MissionControlError> {
    write!(output, "{}", prompt).map_err(MissionControlError::Terminal)?;
    output.flush().map_err(MissionControlError::Terminal)?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(MissionControlError::Terminal)?;

    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<bool, MissionControlError> {
    let answer = ask(&format!("{} [y/N] ", question), input, output)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

// the typed password is echoed, so scripts should prefer the env var
fn password_or_prompt(password: Option<String>) -> Result<String, MissionControlError> {
    match password {
        Some(password) => Ok(password),
        None => ask("Password: ", &mut io::stdin().lock(), &mut io::stderr()),
    }
}

fn print_astronauts(astronauts: &[Astronaut]) {
    if astronauts.is_empty() {
        println!("no astronauts");
        return;
    }

    println!("{:<6} {:<24} {:<32} {}", "ID", "NAME", "EMAIL", "MISSIONS");
    for astronaut in astronauts {
        println!(
            "{:<6} {:<24} {:<32} {}",
            astronaut.id,
            astronaut.name,
            astronaut.email,
            astronaut.missions.len()
        );
    }
}

fn print_missions(missions: &[Mission]) {
    if missions.is_empty() {
        println!("no missions");
        return;
    }

    println!("{:<6} {:<12} {:<28} {}", "ID", "STATUS", "TITLE", "DESCRIPTION");
    for mission in missions {
        println!(
            "{:<6} {:<12} {:<28} {}",
            mission.id,
            mission.status.to_string(),
            mission.title,
            mission.description.as_deref().unwrap_or("-")
        );
    }
}
