pub mod controls;

use std::collections::BTreeMap;

use crate::error::FieldErrors;

pub use controls::{CommentInput, ConfirmDialog};

pub type FormValues = BTreeMap<String, String>;

/// 受控输入的表单状态，所有录入页面共用
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    errors: FieldErrors,
}

impl FormState {
    pub fn new<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: initial
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            errors: FieldErrors::new(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// 整体替换 values，只改变一个字段
    pub fn on_change(&mut self, field: &str, value: impl Into<String>) {
        let mut next = self.values.clone();
        next.insert(field.to_string(), value.into());
        self.values = next;
    }

    pub fn on_submit<R>(&self, mut callback: impl FnMut(&FormValues) -> R) -> R {
        callback(&self.values)
    }

    pub fn reset_field(&mut self, field: &str) {
        self.on_change(field, "");
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }
}

pub fn login_form() -> FormState {
    FormState::new([("username", ""), ("password", "")])
}

pub fn register_form() -> FormState {
    FormState::new([
        ("username", ""),
        ("email", ""),
        ("password", ""),
        ("confirmPassword", ""),
    ])
}

pub fn post_form() -> FormState {
    FormState::new([("body", "")])
}
