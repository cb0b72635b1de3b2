mod capability;
mod chat_ui;
mod config;
mod controller;
mod domain;
mod format;
mod logging;
mod markup;
mod nice_display;
mod render;
#[cfg(test)]
mod test_support;
mod worker;

use crate::config::Config;
use crate::controller::{ChatController, WELCOME_TEXT};
use crate::domain::history::ConversationHistory;
use crate::domain::message::{Message, Role};
use crate::nice_display::NiceDisplay;
use crate::worker::Worker;
use clap::Parser;
use std::io::{BufRead, Write};
use std::sync::Arc;

#[derive(Debug, Parser, Clone)]
#[clap(
    author = "Revnix",
    version = "0.1",
    about = "Chat widget for the Revnix assistant"
)]
enum Cmd {
    /// Open the chat window
    Run,
    /// Send one question and print the reply
    Ask { question: String },
    /// Print the stored conversation history
    History {
        /// Print the rendered message markup instead of plain text
        #[clap(long)]
        html: bool,
    },
    /// Delete the stored conversation history
    ClearHistory,
}

enum Error {
    Config(config::ConfigError),
    Logging(logging::Error),
    WorkerInit(worker::InitError),
    ChatUi(chat_ui::Error),
    Runtime(std::io::Error),
    Console(std::io::Error),
}

impl NiceDisplay for Error {
    fn message(&self) -> String {
        match self {
            Error::Config(err) => format!("Configuration error\n{}", err.message()),
            Error::Logging(err) => err.message(),
            Error::WorkerInit(err) => err.message(),
            Error::ChatUi(err) => err.message(),
            Error::Runtime(err) => format!("Error starting the async runtime: {}", err),
            Error::Console(err) => format!("Error using the console: {}", err),
        }
    }
}

fn main() -> Result<(), String> {
    nice_main().map_err(|err| err.to_nice_error().to_string())
}

fn nice_main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    let cmd = Cmd::parse();

    let config = Config::load().map_err(Error::Config)?;
    let _log_guard = logging::init(&config.log_dir).map_err(Error::Logging)?;
    let worker = Worker::new(&config).map_err(Error::WorkerInit)?;

    tracing::debug!("Using chat backend at {}", config.api_origin);

    match cmd {
        Cmd::Run => chat_ui::run(worker).map_err(Error::ChatUi),
        Cmd::Ask { question } => ask(worker, question),
        Cmd::History { html } => {
            print_history(&worker, html);
            Ok(())
        }
        Cmd::ClearHistory => clear_history(worker),
    }
}

fn ask(worker: Worker, question: String) -> Result<(), Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;

    let mut controller = ChatController::new(Arc::new(worker));
    controller.set_input(question);

    if !runtime.block_on(controller.submit()) {
        println!("Nothing to send.");
        return Ok(());
    }

    if let Some(reply) = controller.messages().last() {
        println!("{}", reply.text());
    }

    Ok(())
}

fn print_history(worker: &Worker, html: bool) {
    let history = ConversationHistory::load(worker);

    if html {
        let messages = history
            .exchanges()
            .iter()
            .flat_map(|exchange| exchange.to_messages())
            .collect::<Vec<Message>>();
        let welcome = Message::new(Role::Bot, WELCOME_TEXT);

        println!(
            "{}",
            render::to_html(&render::render_messages(&welcome, &messages))
        );
        return;
    }

    if history.is_empty() {
        println!("No conversation history.");
        return;
    }

    for exchange in history.exchanges() {
        println!(
            "[{}]\nYou: {}\nAssistant: {}\n",
            exchange.timestamp.format("%Y-%m-%d %H:%M:%S"),
            exchange.question,
            exchange.answer
        );
    }
}

fn clear_history(worker: Worker) -> Result<(), Error> {
    print!("Are you sure you want to clear the conversation? [y/N] ");
    std::io::stdout().flush().map_err(Error::Console)?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(Error::Console)?;

    let mut controller = ChatController::new(Arc::new(worker));
    controller.request_clear();

    if matches!(answer.trim(), "y" | "Y" | "yes") {
        controller.confirm_clear();
        println!("Conversation cleared!");
    } else {
        controller.cancel_clear();
        println!("Kept the conversation.");
    }

    Ok(())
}
