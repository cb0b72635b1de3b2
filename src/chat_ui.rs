mod style;

use self::style as s;
use crate::capability::chat::{ChatCapability, Health, RequestError};
use crate::controller::{ChatController, HealthOutcome, QUICK_QUESTIONS};
use crate::domain::message::Role;
use crate::domain::toast::{ToastKind, ToastTicket, TOAST_DURATION};
use crate::markup;
use crate::nice_display::NiceDisplay;
use crate::render::RenderedMessage;
use crate::worker::Worker;
use iced::widget::{scrollable, text_input};
use iced::{widget as w, Alignment, Element, Length, Size, Task};
use std::sync::Arc;
use std::time::Duration;

const INPUT_ID: &str = "chat-input";
const MESSAGES_ID: &str = "chat-messages";

struct Model {
    controller: ChatController<Worker>,
}

#[derive(Debug, Clone)]
enum Msg {
    InputChanged(String),
    ClickedSend,
    ClickedQuickQuestion(&'static str),
    GotAnswer(String, Result<String, RequestError>),
    HealthChecked(Result<Health, RequestError>),
    ClickedClear,
    ConfirmedClear,
    CancelledClear,
    ToastExpired(ToastTicket),
    ClickedLink(String),
}

pub enum Error {
    IcedRunError(iced::Error),
}

impl NiceDisplay for Error {
    fn message(&self) -> String {
        match self {
            Error::IcedRunError(err) => format!("Iced run error: {}", err),
        }
    }
}

impl Model {
    fn new(worker: Worker) -> (Self, Task<Msg>) {
        let worker = Arc::new(worker);
        let controller = ChatController::new(worker.clone());

        let model = Model { controller };

        let task = Task::batch([
            Task::perform(check_health(worker, Duration::ZERO), Msg::HealthChecked),
            focus_input(),
            scroll_to_end(),
        ]);

        (model, task)
    }

    fn update(&mut self, msg: Msg) -> Task<Msg> {
        match msg {
            Msg::InputChanged(input) => {
                self.controller.set_input(input);
                Task::none()
            }
            Msg::ClickedSend => self.send(),
            Msg::ClickedQuickQuestion(question) => {
                if self.controller.is_busy() {
                    return Task::none();
                }
                self.controller.set_input(question.to_string());
                self.send()
            }
            Msg::GotAnswer(question, result) => {
                let toast_task = match self.controller.finish_submission(question, result) {
                    Some(ticket) => expire_toast_later(ticket),
                    None => Task::none(),
                };

                Task::batch([toast_task, scroll_to_end(), focus_input()])
            }
            Msg::HealthChecked(result) => match self.controller.health_checked(result) {
                HealthOutcome::Ready => Task::none(),
                HealthOutcome::RetryAfter(delay) => {
                    let worker = self.controller.worker();
                    Task::perform(check_health(worker, delay), Msg::HealthChecked)
                }
                HealthOutcome::Failed(ticket) => expire_toast_later(ticket),
            },
            Msg::ClickedClear => {
                self.controller.request_clear();
                Task::none()
            }
            Msg::ConfirmedClear => {
                let toast_task = match self.controller.confirm_clear() {
                    Some(ticket) => expire_toast_later(ticket),
                    None => Task::none(),
                };

                Task::batch([toast_task, focus_input()])
            }
            Msg::CancelledClear => {
                self.controller.cancel_clear();
                Task::none()
            }
            Msg::ToastExpired(ticket) => {
                self.controller.toast_expired(ticket);
                Task::none()
            }
            Msg::ClickedLink(url) => match opener::open_browser(&url) {
                Ok(()) => Task::none(),
                Err(err) => {
                    tracing::warn!("Could not open link {}: {}", url, err);
                    let ticket = self
                        .controller
                        .show_toast("Could not open the link.", ToastKind::Error);
                    expire_toast_later(ticket)
                }
            },
        }
    }

    fn send(&mut self) -> Task<Msg> {
        let Some(question) = self.controller.begin_submission() else {
            return Task::none();
        };

        let worker = self.controller.worker();

        Task::batch([
            scroll_to_end(),
            Task::perform(
                async move {
                    let result = worker.ask(&question).await;
                    (question, result)
                },
                |(question, result)| Msg::GotAnswer(question, result),
            ),
        ])
    }

    fn view(&self) -> Element<'_, Msg> {
        let mut body = w::column![
            self.view_header(),
            self.view_messages(),
            self.view_quick_questions(),
        ]
        .spacing(s::S3)
        .height(Length::Fill);

        if self.controller.clear_pending() {
            body = body.push(view_clear_confirmation());
        }

        body = body.push(self.view_composer());

        if let Some(toast) = self.controller.toast() {
            body = body.push(
                w::container(w::text(toast.message.as_str()))
                    .padding(s::S2)
                    .width(Length::Fill)
                    .style(s::toast(toast.kind)),
            );
        }

        w::container(body).padding(s::S4).into()
    }

    fn view_header(&self) -> Element<'_, Msg> {
        let status = self.controller.status();

        w::row![
            w::text("Revnix Assistant").size(22),
            w::horizontal_space(),
            w::text("●").color(s::status_color(status.status)),
            w::text(status.text.as_str()).size(14),
            w::button("Clear chat").on_press(Msg::ClickedClear),
        ]
        .spacing(s::S2)
        .align_y(Alignment::Center)
        .into()
    }

    fn view_messages(&self) -> Element<'_, Msg> {
        let mut list = self
            .controller
            .rendered()
            .into_iter()
            .fold(w::column![].spacing(s::S2), |col, message| {
                col.push(view_message(message))
            });

        if self.controller.is_typing() {
            list = list.push(w::text("Assistant is typing...").size(12).color(s::GRAY_MID));
        }

        w::scrollable(list)
            .id(scrollable::Id::new(MESSAGES_ID))
            .height(Length::Fill)
            .width(Length::Fill)
            .into()
    }

    fn view_quick_questions(&self) -> Element<'_, Msg> {
        let busy = self.controller.is_busy();

        QUICK_QUESTIONS
            .iter()
            .fold(w::row![].spacing(s::S1), |row, question| {
                let button = w::button(w::text(*question).size(12));
                row.push(if busy {
                    button
                } else {
                    button.on_press(Msg::ClickedQuickQuestion(*question))
                })
            })
            .wrap()
            .into()
    }

    fn view_composer(&self) -> Element<'_, Msg> {
        let busy = self.controller.is_busy();

        let mut input = w::text_input("Ask me anything about Revnix...", self.controller.input())
            .id(text_input::Id::new(INPUT_ID))
            .padding(s::S2)
            .width(Length::Fill);

        let mut send_button = w::button("Send").height(s::INPUT_HEIGHT);

        if !busy {
            input = input
                .on_input(Msg::InputChanged)
                .on_submit(Msg::ClickedSend);
            send_button = send_button.on_press(Msg::ClickedSend);
        }

        let char_count = self.controller.char_count();

        w::column![
            w::row![input, send_button].spacing(s::S1),
            w::text(char_count.label())
                .size(12)
                .color(s::char_count_color(char_count.level())),
        ]
        .spacing(s::S1)
        .into()
    }
}

fn view_message(message: RenderedMessage) -> Element<'static, Msg> {
    let spans = markup::parse(&message.markup)
        .into_iter()
        .map(|span| {
            let font = match (span.bold, span.italic) {
                (true, true) => s::bold_italic(),
                (true, false) => s::bold(),
                (false, true) => s::italic(),
                (false, false) => s::font(),
            };

            let styled = w::span(span.text).font(font);

            match span.link {
                Some(href) => styled.color(s::BLUE_LINK).link(Msg::ClickedLink(href)),
                None => styled,
            }
        })
        .collect::<Vec<_>>();

    let (speaker, alignment) = match message.role {
        Role::User => ("You", Alignment::End),
        Role::Bot => ("Assistant", Alignment::Start),
    };

    let bubble = w::container(
        w::column![
            w::text(format!("{} · {}", speaker, message.time))
                .size(11)
                .color(s::GRAY_MID),
            w::rich_text(spans),
        ]
        .spacing(s::S1),
    )
    .padding(s::S3)
    .max_width(560.0)
    .style(s::bubble(message.role));

    w::column![bubble]
        .width(Length::Fill)
        .align_x(alignment)
        .into()
}

fn view_clear_confirmation() -> Element<'static, Msg> {
    w::row![
        w::text("Are you sure you want to clear the conversation?"),
        w::horizontal_space(),
        w::button("Clear").on_press(Msg::ConfirmedClear),
        w::button("Cancel").on_press(Msg::CancelledClear),
    ]
    .spacing(s::S2)
    .align_y(Alignment::Center)
    .into()
}

async fn check_health(worker: Arc<Worker>, delay: Duration) -> Result<Health, RequestError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    worker.check_health().await
}

fn expire_toast_later(ticket: ToastTicket) -> Task<Msg> {
    Task::perform(tokio::time::sleep(TOAST_DURATION), move |_| Msg::ToastExpired(ticket))
}

fn focus_input() -> Task<Msg> {
    text_input::focus(text_input::Id::new(INPUT_ID))
}

fn scroll_to_end() -> Task<Msg> {
    scrollable::snap_to(scrollable::Id::new(MESSAGES_ID), scrollable::RelativeOffset::END)
}

pub fn run(worker: Worker) -> Result<(), Error> {
    iced::application("Revnix Assistant", Model::update, Model::view)
        .theme(|_| s::theme())
        .default_font(s::font())
        .window_size(Size::new(720.0, 820.0))
        .run_with(move || Model::new(worker))
        .map_err(Error::IcedRunError)
}
