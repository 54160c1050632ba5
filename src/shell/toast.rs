//! Transient notifications

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "[ok] {}", self.message),
            ToastKind::Error => write!(f, "[error] {}", self.message),
        }
    }
}

/// Queue drained after each console action
#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        // Same message twice in a row collapses
        if self
            .queue
            .back()
            .map(|t| t.kind == kind && t.message == message)
            .unwrap_or(false)
        {
            return;
        }
        self.queue.push_back(Toast { kind, message });
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_order() {
        let mut toasts = Toasts::default();
        toasts.success("Evento creado");
        toasts.error("Sin cupos");
        toasts.error("Sin cupos");

        let drained = toasts.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].to_string(), "[ok] Evento creado");
        assert_eq!(drained[1].kind, ToastKind::Error);
        assert!(toasts.is_empty());
    }
}
