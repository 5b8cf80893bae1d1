//! Callback request ("lead") messages: the contact forms and the
//! product-picker quiz.

use crate::checkout::{phone_digit_count, MIN_PHONE_LEN};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A short callback request from one of the site's contact forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRequest {
    /// Heading of the form the request came from.
    pub form: String,
    /// Optional subject typed by the visitor.
    #[serde(default)]
    pub topic: Option<String>,
    pub phone: String,
}

impl LeadRequest {
    pub fn new(form: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            topic: None,
            phone: phone.into(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Build the message text. The phone must carry at least [`MIN_PHONE_LEN`] digits.
    pub fn render(&self) -> Result<String, CommerceError> {
        if phone_digit_count(&self.phone) < MIN_PHONE_LEN {
            return Err(CommerceError::validation(
                "phone",
                "Введите корректный номер телефона",
            ));
        }

        let mut lines = vec![format!("Новая заявка (форма: {})", self.form)];
        if let Some(topic) = self.topic.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("Тема: {topic}"));
        }
        lines.push(format!("Телефон: {}", self.phone));
        Ok(lines.join("\n"))
    }
}

/// Form name of the product-picker quiz.
pub const QUIZ_FORM: &str = "Квиз — Подбор приставки";

/// Answers offered for "what TV do you have".
pub const QUIZ_TV_TYPES: [&str; 3] = ["Smart TV", "Обычный ТВ", "Не знаю"];

/// Answers offered for "what do you want to watch".
pub const QUIZ_USAGES: [&str; 4] = ["ТВ каналы", "YouTube", "Фильмы/сериалы", "Всё сразу"];

/// Answers offered for "what is your budget".
pub const QUIZ_BUDGETS: [&str; 3] = ["До 2000₽", "2000-5000₽", "5000+₽"];

/// A request sent from the product-picker quiz. Unanswered steps are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizLead {
    #[serde(default)]
    pub tv_type: Option<String>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    pub phone: String,
}

impl QuizLead {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn with_tv_type(mut self, answer: impl Into<String>) -> Self {
        self.tv_type = Some(answer.into());
        self
    }

    pub fn with_usage(mut self, answer: impl Into<String>) -> Self {
        self.usage = Some(answer.into());
        self
    }

    pub fn with_budget(mut self, answer: impl Into<String>) -> Self {
        self.budget = Some(answer.into());
        self
    }

    /// Build the message text.
    ///
    /// Answers must be one of the offered options (compared case-insensitively)
    /// and the phone must carry at least [`MIN_PHONE_LEN`] digits.
    pub fn render(&self) -> Result<String, CommerceError> {
        let tv_type = quiz_answer("tv_type", &QUIZ_TV_TYPES, self.tv_type.as_deref())?;
        let usage = quiz_answer("usage", &QUIZ_USAGES, self.usage.as_deref())?;
        let budget = quiz_answer("budget", &QUIZ_BUDGETS, self.budget.as_deref())?;
        if phone_digit_count(&self.phone) < MIN_PHONE_LEN {
            return Err(CommerceError::validation(
                "phone",
                "Введите корректный номер телефона",
            ));
        }

        Ok([
            format!("🎯 Новая заявка (форма: {QUIZ_FORM})"),
            format!("📺 ТВ: {}", tv_type.unwrap_or("-")),
            format!("🎬 Цель: {}", usage.unwrap_or("-")),
            format!("💰 Бюджет: {}", budget.unwrap_or("-")),
            format!("📱 Телефон: {}", self.phone),
        ]
        .join("\n"))
    }
}

/// The offered option an answer names, if it was answered at all.
fn quiz_answer(
    field: &'static str,
    options: &[&'static str],
    answer: Option<&str>,
) -> Result<Option<&'static str>, CommerceError> {
    let Some(answer) = answer.map(str::trim).filter(|a| !a.is_empty()) else {
        return Ok(None);
    };
    let wanted = answer.to_lowercase();
    options
        .iter()
        .find(|option| option.to_lowercase() == wanted)
        .map(|option| Some(*option))
        .ok_or_else(|| {
            CommerceError::validation(
                field,
                format!("Неизвестный ответ \"{answer}\", варианты: {}", options.join(", ")),
            )
        })
}
