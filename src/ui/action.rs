use crate::catalog::IdentityKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleSelection(IdentityKey),
    ToggleDescription(String),
    RemoveSelected(usize),
    ClearSelection,
    SetCategory(Option<String>),
    SetSearch(String),
    GenerateRoutine,
    SendFollowUp(String),
    StartQuiz,
    AnswerQuiz(String),
    PickImage,
}

impl Action {
    pub fn to_log_line(&self) -> String {
        match self {
            Self::ToggleSelection(key) => {
                format!("toggle_selection name={} brand={}", key.name, key.brand)
            }
            Self::ToggleDescription(name) => format!("toggle_description name={name}"),
            Self::RemoveSelected(index) => format!("remove_selected index={index}"),
            Self::ClearSelection => "clear_selection".to_string(),
            Self::SetCategory(category) => format!(
                "set_category category={}",
                category.as_deref().unwrap_or("-")
            ),
            Self::SetSearch(term) => format!("set_search term={term:?}"),
            Self::GenerateRoutine => "generate_routine".to_string(),
            Self::SendFollowUp(text) => format!("send_follow_up chars={}", text.chars().count()),
            Self::StartQuiz => "start_quiz".to_string(),
            Self::AnswerQuiz(option) => format!("answer_quiz option={option}"),
            Self::PickImage => "pick_image".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SendTurn(crate::assistant::PendingTurn),
    PickImage,
}
