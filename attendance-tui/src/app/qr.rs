use super::TextInput;
use crate::poller::QrFrame;

/// QR display. `polling` is `None` while idle.
#[derive(Debug, Clone, Default)]
pub struct QrState {
    pub company_input: TextInput,
    pub polling: Option<i64>,
    pub frame: Option<QrFrame>,
    pub warning: Option<String>,
}

impl QrState {
    /// Company IDs are whole numbers starting at 1.
    pub fn parse_company_id(&self) -> Option<i64> {
        self.company_input
            .trimmed()
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 1)
    }

    pub fn input_digit(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.company_input.insert(c);
        }
    }

    pub fn start(&mut self, company_id: i64) {
        self.polling = Some(company_id);
        self.frame = None;
        self.warning = None;
    }

    pub fn stop(&mut self) {
        self.polling = None;
        self.frame = None;
        self.warning = None;
    }
}
