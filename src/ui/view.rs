use crate::assistant::ChatEntry;
use crate::catalog::Product;
use crate::quiz::{Quiz, QuizPhase, QUESTION_COUNT};
use crate::selection::Selection;
use crate::ui::action::Action;
use std::collections::BTreeSet;

pub const CATALOG_PLACEHOLDER: &str = "Select a category to view products";
pub const NO_MATCHES_PLACEHOLDER: &str = "No products match your filters.";
pub const EMPTY_SELECTION_PLACEHOLDER: &str = "No products selected yet.";
pub const MISSING_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub brand: String,
    pub image: String,
    pub selected: bool,
    pub expanded: bool,
    pub description: String,
    pub toggle_label: &'static str,
    pub on_click: Action,
    pub on_toggle_description: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    Placeholder(&'static str),
    Cards(Vec<CardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    pub index: usize,
    pub name: String,
    pub image: String,
    pub on_remove: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub chips: Vec<ChipView>,
    pub placeholder: Option<&'static str>,
    pub clear: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: &'static str,
    pub on_pick: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizView {
    NotStarted {
        start: Action,
    },
    Asking {
        step: usize,
        total: usize,
        prompt: &'static str,
        options: Vec<OptionView>,
    },
    Finished {
        restart: Action,
    },
}

pub fn catalog_view(
    visible: Option<&[Product]>,
    selection: &Selection,
    expanded: &BTreeSet<String>,
) -> CatalogView {
    let Some(products) = visible else {
        return CatalogView::Placeholder(CATALOG_PLACEHOLDER);
    };
    if products.is_empty() {
        return CatalogView::Placeholder(NO_MATCHES_PLACEHOLDER);
    }

    CatalogView::Cards(
        products
            .iter()
            .map(|product| {
                // Keyed by name alone: same-named products expand together.
                let expanded = expanded.contains(&product.name);
                CardView {
                    name: product.name.clone(),
                    brand: product.brand.clone(),
                    image: product.image.clone(),
                    selected: selection.contains(&product.key()),
                    expanded,
                    description: product
                        .description
                        .clone()
                        .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
                    toggle_label: if expanded {
                        "Hide Description"
                    } else {
                        "Show Description"
                    },
                    on_click: Action::ToggleSelection(product.key()),
                    on_toggle_description: Action::ToggleDescription(product.name.clone()),
                }
            })
            .collect(),
    )
}

pub fn selection_view(selection: &Selection) -> SelectionView {
    if selection.is_empty() {
        return SelectionView {
            chips: Vec::new(),
            placeholder: Some(EMPTY_SELECTION_PLACEHOLDER),
            clear: None,
        };
    }

    SelectionView {
        chips: selection
            .items()
            .iter()
            .enumerate()
            .map(|(index, product)| ChipView {
                index,
                name: product.name.clone(),
                image: product.image.clone(),
                on_remove: Action::RemoveSelected(index),
            })
            .collect(),
        placeholder: None,
        clear: Some(Action::ClearSelection),
    }
}

pub fn quiz_view(quiz: Option<&Quiz>) -> QuizView {
    let Some(quiz) = quiz else {
        return QuizView::NotStarted {
            start: Action::StartQuiz,
        };
    };

    match (quiz.phase(), quiz.current_question()) {
        (QuizPhase::Question(index), Some(question)) => QuizView::Asking {
            step: index + 1,
            total: QUESTION_COUNT,
            prompt: question.prompt,
            options: question
                .options
                .iter()
                .map(|option| OptionView {
                    label: *option,
                    on_pick: Action::AnswerQuiz(option.to_string()),
                })
                .collect(),
        },
        _ => QuizView::Finished {
            restart: Action::StartQuiz,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatLineKind {
    Notice,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub kind: ChatLineKind,
    pub text: String,
}

pub fn chat_lines(entries: &[ChatEntry]) -> Vec<ChatLine> {
    entries
        .iter()
        .map(|entry| match entry {
            ChatEntry::Notice(text) | ChatEntry::Pending { text, .. } => ChatLine {
                kind: ChatLineKind::Notice,
                text: text.clone(),
            },
            ChatEntry::User(text) => ChatLine {
                kind: ChatLineKind::User,
                text: format!("You: {text}"),
            },
            ChatEntry::Assistant(text) => ChatLine {
                kind: ChatLineKind::Assistant,
                text: text.clone(),
            },
        })
        .collect()
}
