mod render;

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use services::config::parse_timeout;
use services::{
    ApiConfig, AppServices, Clock, Fetched, Notice, NoticeLevel, Notifier, Playground, QuizService,
    QuizSession,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;
use tutor_core::model::TopicId;
use tutor_core::quiz::QuizFlow;
use ui::vm::{
    DashboardVm, LessonVm, ProgressVm, QuestionVm, ResultsVm, RunOutputVm, map_topic_cards,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTopicId { raw: String },
    MissingFlag { command: &'static str, flag: &'static str },
    EmptyUsername,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTopicId { raw } => write!(f, "invalid --topic value: {raw}"),
            ArgsError::MissingFlag { command, flag } => write!(f, "{command} requires {flag}"),
            ArgsError::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// The session cookie lives only as long as the process.
const SESSION_NOTE: &str =
    "Sessions are not kept between runs: pass --user <name> to each command.";

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  tutor dashboard                       [options]");
    eprintln!("  tutor progress                        [options]");
    eprintln!("  tutor topics                          [options]");
    eprintln!("  tutor learn --topic <id> [--code <file>] [--hint] [options]");
    eprintln!("  tutor quiz  --topic <id>              [options]");
    eprintln!("  tutor register --user <name> --email <email> [options]");
    eprintln!("  tutor whoami   --user <name>          [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url <url>     backend base url (default http://localhost:5000)");
    eprintln!("  --timeout <secs>    request timeout");
    eprintln!("  --user <name>       log in before running the command");
    eprintln!();
    eprintln!("{SESSION_NOTE}");
    eprintln!("  --json              print view data as JSON");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_API_URL, TUTOR_API_TIMEOUT_SECS, TUTOR_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Dashboard,
    Progress,
    Topics,
    Learn,
    Quiz,
    Register,
    Whoami,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "dashboard" => Some(Self::Dashboard),
            "progress" => Some(Self::Progress),
            "topics" => Some(Self::Topics),
            "learn" => Some(Self::Learn),
            "quiz" => Some(Self::Quiz),
            "register" => Some(Self::Register),
            "whoami" => Some(Self::Whoami),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Progress => "progress",
            Self::Topics => "topics",
            Self::Learn => "learn",
            Self::Quiz => "quiz",
            Self::Register => "register",
            Self::Whoami => "whoami",
        }
    }
}

#[derive(Debug)]
struct Args {
    command: Command,
    api_url: Option<String>,
    timeout: Option<Duration>,
    user: Option<String>,
    email: Option<String>,
    topic: Option<TopicId>,
    code_file: Option<String>,
    hint: bool,
    json: bool,
}

impl Args {
    fn parse(
        command: Command,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut parsed = Self {
            command,
            api_url: None,
            timeout: None,
            user: None,
            email: None,
            topic: None,
            code_file: None,
            hint: false,
            json: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => parsed.api_url = Some(require_value(args, "--api-url")?),
                "--timeout" => {
                    let value = require_value(args, "--timeout")?;
                    parsed.timeout = Some(parse_timeout(&value)?);
                }
                "--user" => {
                    let value = require_value(args, "--user")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyUsername.into());
                    }
                    parsed.user = Some(value.trim().to_string());
                }
                "--email" => parsed.email = Some(require_value(args, "--email")?),
                "--topic" => {
                    let value = require_value(args, "--topic")?;
                    let id = value
                        .parse::<TopicId>()
                        .map_err(|_| ArgsError::InvalidTopicId { raw: value.clone() })?;
                    parsed.topic = Some(id);
                }
                "--code" => parsed.code_file = Some(require_value(args, "--code")?),
                "--hint" => parsed.hint = true,
                "--json" => parsed.json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg).into()),
            }
        }

        Ok(parsed)
    }

    fn topic(&self) -> Result<TopicId, ArgsError> {
        self.topic.ok_or(ArgsError::MissingFlag {
            command: self.command.name(),
            flag: "--topic",
        })
    }

    fn user(&self) -> Result<&str, ArgsError> {
        self.user.as_deref().ok_or(ArgsError::MissingFlag {
            command: self.command.name(),
            flag: "--user",
        })
    }

    fn config(&self) -> Result<ApiConfig, Box<dyn std::error::Error>> {
        let mut config = ApiConfig::from_env()?;
        if let Some(raw) = &self.api_url {
            config = ApiConfig::new(raw)?.with_timeout(config.timeout);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }
}

/// Prints notices to stderr so stdout stays clean for `--json`.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => eprintln!("ok: {}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TUTOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}

fn emit<T: Serialize>(vm: &T, json: bool, text: impl FnOnce(&T)) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(vm)?);
    } else {
        text(vm);
    }
    Ok(())
}

type StdinLines = Lines<BufReader<Stdin>>;

async fn prompt(lines: &mut StdinLines, text: &str) -> std::io::Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}

async fn run_quiz(
    quiz: &QuizService,
    topic_id: TopicId,
) -> Result<(), Box<dyn std::error::Error>> {
    let topic = quiz.load_topic(topic_id).await?;
    let mut session = QuizSession::new();
    println!("Generating a quiz on {}...", topic.name);
    quiz.start(&mut session, topic).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        session.apply_arrived();
        match session.flow() {
            QuizFlow::InProgress { attempt, .. } => {
                let index = attempt.current_index();
                render::question(&QuestionVm::from(attempt));
                let Some(input) =
                    prompt(&mut lines, "[A-D] answer, n/p move, s submit, q quit > ").await?
                else {
                    return Ok(());
                };
                match input.to_ascii_lowercase().as_str() {
                    "q" => {
                        quiz.back_to_topics(&mut session);
                        return Ok(());
                    }
                    "n" => {
                        if let Some(attempt) = session.flow_mut().attempt_mut() {
                            attempt.next();
                        }
                    }
                    "p" => {
                        if let Some(attempt) = session.flow_mut().attempt_mut() {
                            attempt.previous();
                        }
                    }
                    "s" => {
                        if let Err(err) = quiz.submit(&mut session).await {
                            tracing::debug!(error = %err, "quiz not submitted");
                        }
                    }
                    choice => {
                        match quiz.answer(&mut session, index, &choice.to_ascii_uppercase()) {
                            Ok(()) => {
                                if let Some(attempt) = session.flow_mut().attempt_mut() {
                                    attempt.next();
                                }
                            }
                            Err(err) => eprintln!("{err}"),
                        }
                    }
                }
            }
            QuizFlow::Submitted { results, .. } => {
                render::results(&ResultsVm::from(results));
                let Some(input) = prompt(&mut lines, "r retake, q quit > ").await? else {
                    return Ok(());
                };
                if input.eq_ignore_ascii_case("r") {
                    quiz.retake(&mut session).await?;
                } else {
                    return Ok(());
                }
            }
            QuizFlow::TopicSelection | QuizFlow::Generating { .. } => return Ok(()),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1).peekable();

    let command = match argv.peek().map(String::as_str) {
        None => Command::Dashboard,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Dashboard,
        Some(first) => {
            let command = Command::from_arg(first).ok_or_else(|| {
                eprintln!("unknown subcommand: {first}");
                print_usage();
                ArgsError::UnknownArg(first.to_string())
            })?;
            argv.next();
            command
        }
    };

    let args = Args::parse(command, &mut argv).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?;

    let services = AppServices::http(
        args.config()?,
        Arc::new(TerminalNotifier),
        Clock::default_clock(),
    )?;
    let auth = services.auth();

    let registering = command == Command::Register;
    if let (Some(user), false) = (&args.user, registering) {
        auth.login(user).await?;
    }

    match command {
        Command::Dashboard => {
            let dashboard = services.dashboard().load().await?;
            emit(&DashboardVm::from(&dashboard), args.json, render::dashboard)?;
        }
        Command::Progress => {
            let report = services.progress().load().await?;
            let vm = ProgressVm::new(&report, services.clock().now());
            emit(&vm, args.json, render::progress)?;
        }
        Command::Topics => {
            let topics = services.quiz().list_topics().await?;
            emit(&map_topic_cards(&topics), args.json, |cards| render::topics(cards))?;
        }
        Command::Learn => {
            let learning = services.learning();
            let topic_id = args.topic()?;
            let topic = learning.load_topic(topic_id).await?;
            let lesson = learning.lesson(topic_id).await?;
            emit(&LessonVm::from(&lesson), args.json, render::lesson)?;

            let mut playground = Playground::new(topic.name);
            if let Some(path) = &args.code_file {
                playground.set_code(std::fs::read_to_string(path)?);
                let check = learning.run_code(&mut playground).await;
                let output = RunOutputVm::new(&check, playground.attempt_count());
                emit(&output, args.json, render::run_output)?;
            }
            if args.hint {
                let hint = learning.hint(&playground).await?;
                if let Some(text) = hint.hint {
                    println!("Hint: {text}");
                }
            }
            if let Fetched::Present(next) = learning.next_topic(topic_id).await {
                println!("Up next: [{}] {}", next.id, next.name);
            }
        }
        Command::Quiz => run_quiz(&services.quiz(), args.topic()?).await?,
        Command::Register => {
            let email = args.email.as_deref().ok_or(ArgsError::MissingFlag {
                command: "register",
                flag: "--email",
            })?;
            let user = auth.register(args.user()?, email).await?;
            println!("Registered {} ({})", user.username, user.user_id);
        }
        Command::Whoami => match auth.current_user().await? {
            Some(user) => println!("{} ({})", user.username, user.user_id),
            None => println!("Not logged in. {SESSION_NOTE}"),
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(command: Command, args: &[&str]) -> Result<Args, Box<dyn std::error::Error>> {
        let mut iter = args.iter().map(|s| s.to_string());
        Args::parse(command, &mut iter)
    }

    #[test]
    fn parses_quiz_flags() {
        let args = parse(Command::Quiz, &["--topic", "4", "--user", " ada ", "--json"]).unwrap();
        assert_eq!(args.topic().unwrap(), TopicId::new(4));
        assert_eq!(args.user().unwrap(), "ada");
        assert!(args.json);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(Command::Learn, &["--topic", "four"]).is_err());
        assert!(parse(Command::Register, &["--user", "  "]).is_err());
        assert!(parse(Command::Dashboard, &["--timeout", "0"]).is_err());
        assert!(parse(Command::Dashboard, &["--verbose"]).is_err());
        assert!(parse(Command::Dashboard, &["--api-url"]).is_err());
    }

    #[test]
    fn login_is_not_a_standalone_command() {
        assert_eq!(Command::from_arg("login"), None);
        assert_eq!(Command::from_arg("whoami"), Some(Command::Whoami));
        assert!(SESSION_NOTE.contains("--user"));
    }

    #[test]
    fn missing_topic_names_the_command() {
        let args = parse(Command::Learn, &[]).unwrap();
        assert_eq!(args.topic().unwrap_err().to_string(), "learn requires --topic");
    }
}
