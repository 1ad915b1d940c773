#[derive(Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Counts notices shown so far. A delayed clear only applies if no newer
/// notice replaced the one it was scheduled for.
#[derive(Default)]
pub struct NoticeSeq {
    current: u32,
}

impl NoticeSeq {
    pub fn next(&mut self) -> u32 {
        self.current = self.current.wrapping_add(1);
        self.current
    }

    pub fn is_current(&self, ticket: u32) -> bool {
        self.current == ticket
    }
}
