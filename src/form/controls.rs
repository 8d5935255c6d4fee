/// 评论输入框的临时状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentInput {
    pub text: String,
    pub focused: bool,
}

impl CommentInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.focused = true;
    }

    /// 去掉空白后为空时不允许提交
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// 提交成功后清空并失去焦点
    pub fn reset(&mut self) {
        self.text.clear();
        self.focused = false;
    }
}

/// 删除前的确认对话框
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmDialog {
    open: bool,
}

impl ConfirmDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
