use std::time::Duration;

pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// Identifies one `show` call. An expiry only hides the toast it was
/// scheduled for; a newer toast keeps its own full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub ticket: ToastTicket,
}

#[derive(Debug, Default)]
pub struct Toaster {
    current: Option<Toast>,
    issued: u64,
}

impl Toaster {
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastTicket {
        self.issued += 1;
        let ticket = ToastTicket(self.issued);

        self.current = Some(Toast {
            message: message.into(),
            kind,
            ticket,
        });

        ticket
    }

    pub fn expire(&mut self, ticket: ToastTicket) {
        if self.current.as_ref().map(|toast| toast.ticket) == Some(ticket) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}
