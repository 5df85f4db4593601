use crate::assistant::Conversation;
use crate::catalog::{Catalog, Product};
use crate::event::AppEvent;
use crate::preview::PreviewState;
use crate::quiz::Quiz;
use crate::selection::store::KeyValueStore;
use crate::selection::Selection;
use crate::ui::action::{Action, Effect};
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

const DIAGNOSTICS_CAP: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed(String),
}

pub struct AppState {
    store: Box<dyn KeyValueStore>,
    catalog: Catalog,
    catalog_status: CatalogStatus,
    category: Option<String>,
    search: String,
    selection: Selection,
    expanded: BTreeSet<String>,
    quiz: Option<Quiz>,
    conversation: Conversation,
    preview: PreviewState,
    diagnostics_log: Vec<String>,
}

impl AppState {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let selection = Selection::restore(store.as_ref());
        info!("restored selection with {} products", selection.len());
        Self {
            store,
            catalog: Catalog::default(),
            catalog_status: CatalogStatus::Loading,
            category: None,
            search: String::new(),
            selection,
            expanded: BTreeSet::new(),
            quiz: None,
            conversation: Conversation::new(),
            preview: PreviewState::default(),
            diagnostics_log: Vec::new(),
        }
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    pub fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
        if self.diagnostics_log.len() > DIAGNOSTICS_CAP {
            let excess = self.diagnostics_log.len() - DIAGNOSTICS_CAP;
            self.diagnostics_log.drain(..excess);
        }
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics_log
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn expanded(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn visible_products(&self) -> Option<Vec<Product>> {
        if self.category.is_none() && self.search.trim().is_empty() {
            return None;
        }
        Some(self.catalog.filter(self.category.as_deref(), &self.search))
    }

    fn persist_selection(&mut self) {
        if let Err(err) = self.selection.persist(self.store.as_ref()) {
            error!("failed to persist selection: {err}");
            self.log_diagnostic(format!("failed to persist selection: {err}"));
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        // Filter edits fire on every keystroke and stay out of the log.
        if !matches!(action, Action::SetSearch(_) | Action::SetCategory(_)) {
            self.log_diagnostic(action.to_log_line());
        }

        match action {
            Action::ToggleSelection(key) => {
                let product = self
                    .catalog
                    .find(&key)
                    .or_else(|| {
                        self.selection
                            .items()
                            .iter()
                            .find(|product| product.matches(&key))
                    })
                    .cloned();
                match product {
                    Some(product) => {
                        self.selection.toggle(&product);
                        self.persist_selection();
                    }
                    None => warn!("toggle for unknown product {} / {}", key.name, key.brand),
                }
                None
            }
            Action::ToggleDescription(name) => {
                if !self.expanded.remove(&name) {
                    self.expanded.insert(name);
                }
                None
            }
            Action::RemoveSelected(index) => {
                if self.selection.remove(index).is_none() {
                    warn!("ignoring stale remove index {index}");
                }
                self.persist_selection();
                None
            }
            Action::ClearSelection => {
                self.selection.clear();
                self.persist_selection();
                None
            }
            Action::SetCategory(category) => {
                self.category = category.filter(|category| !category.is_empty());
                None
            }
            Action::SetSearch(term) => {
                self.search = term;
                None
            }
            Action::GenerateRoutine => self
                .conversation
                .begin_routine(self.selection.items())
                .map(Effect::SendTurn),
            Action::SendFollowUp(text) => self
                .conversation
                .begin_follow_up(&text)
                .map(Effect::SendTurn),
            Action::StartQuiz => {
                match self.quiz.as_mut() {
                    Some(quiz) => quiz.restart(),
                    None => self.quiz = Some(Quiz::start()),
                }
                None
            }
            Action::AnswerQuiz(option) => {
                let Some(quiz) = self.quiz.as_mut() else {
                    warn!("quiz answer without an active run");
                    return None;
                };
                match quiz.answer(&option) {
                    Ok(Some(recommendation)) => {
                        let text = recommendation.render();
                        self.conversation.show_quiz_result(text);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!("quiz answer rejected: {err}");
                        self.log_diagnostic(format!("quiz answer rejected: {err}"));
                    }
                }
                None
            }
            Action::PickImage => Some(Effect::PickImage),
        }
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded(Ok(catalog)) => {
                if catalog.is_empty() {
                    warn!("catalog loaded but contains no products");
                }
                info!("catalog loaded with {} products", catalog.products().len());
                self.log_diagnostic(format!(
                    "catalog loaded: {} products",
                    catalog.products().len()
                ));
                self.catalog = catalog;
                self.catalog_status = CatalogStatus::Ready;
            }
            AppEvent::CatalogLoaded(Err(err)) => {
                error!("catalog load failed: {err}");
                self.log_diagnostic(format!("catalog load failed: {err}"));
                self.catalog_status = CatalogStatus::Failed(err.to_string());
            }
            AppEvent::AssistantReplied { turn, result } => {
                if let Err(err) = &result {
                    self.log_diagnostic(format!("assistant turn {} failed: {err}", turn.id));
                }
                self.conversation.complete(turn, result);
            }
            AppEvent::ImageRead(result) => {
                if let Err(err) = &result {
                    warn!("image rejected: {err}");
                    self.log_diagnostic(format!("image rejected: {err}"));
                }
                self.preview.apply(result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{ChatEntry, TRANSPORT_FALLBACK};
    use crate::catalog::fixtures::sample;
    use crate::error::{BridgeError, CatalogError};
    use crate::quiz::QUESTION_COUNT;
    use crate::selection::store::MemoryStore;
    use crate::selection::STORAGE_KEY;
    use std::rc::Rc;

    struct SharedStore(Rc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: String) -> Result<(), crate::error::StorageError> {
            self.0.set(key, value)
        }
    }

    fn loaded_state() -> (AppState, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new());
        let mut state = AppState::new(Box::new(SharedStore(Rc::clone(&store))));
        state.apply_event(AppEvent::CatalogLoaded(Ok(Catalog::new(sample()))));
        (state, store)
    }

    fn stored_names(store: &MemoryStore) -> Vec<String> {
        let raw = store.get(STORAGE_KEY).expect("selection should be persisted");
        let products: Vec<Product> = serde_json::from_str(&raw).expect("stored json");
        products.into_iter().map(|product| product.name).collect()
    }

    #[test]
    fn every_selection_mutation_is_persisted() {
        let (mut state, store) = loaded_state();
        let products = sample();

        state.dispatch(Action::ToggleSelection(products[0].key()));
        state.dispatch(Action::ToggleSelection(products[3].key()));
        assert_eq!(stored_names(&store), vec!["Hydrating Cleanser", "Color Riche Lipstick"]);

        state.dispatch(Action::RemoveSelected(0));
        assert_eq!(stored_names(&store), vec!["Color Riche Lipstick"]);

        state.dispatch(Action::ClearSelection);
        assert!(stored_names(&store).is_empty());
    }

    #[test]
    fn startup_restores_persisted_selection() {
        let products = sample();
        let payload = serde_json::to_string(&vec![products[2].clone()]).expect("fixture json");
        let state = AppState::new(Box::new(MemoryStore::with_entry(STORAGE_KEY, &payload)));
        assert_eq!(state.selection().items(), &[products[2].clone()]);
    }

    #[test]
    fn description_toggle_does_not_change_selection() {
        let (mut state, store) = loaded_state();
        let products = sample();

        state.dispatch(Action::ToggleDescription(products[0].name.clone()));
        assert!(state.expanded().contains(&products[0].name));
        assert!(state.selection().is_empty());
        assert!(store.get(STORAGE_KEY).is_none());

        state.dispatch(Action::ToggleDescription(products[0].name.clone()));
        assert!(state.expanded().is_empty());
    }

    #[test]
    fn stale_remove_index_is_ignored() {
        let (mut state, _store) = loaded_state();
        let products = sample();
        state.dispatch(Action::ToggleSelection(products[1].key()));

        state.dispatch(Action::RemoveSelected(3));
        assert_eq!(state.selection().len(), 1);
    }

    #[test]
    fn restored_product_missing_from_catalog_can_still_be_deselected() {
        let mut retired = sample()[0].clone();
        retired.name = "Retired Toner".to_string();
        let payload = serde_json::to_string(&vec![retired.clone()]).expect("fixture json");
        let mut state = AppState::new(Box::new(MemoryStore::with_entry(STORAGE_KEY, &payload)));
        state.apply_event(AppEvent::CatalogLoaded(Ok(Catalog::new(sample()))));

        state.dispatch(Action::ToggleSelection(retired.key()));
        assert!(state.selection().is_empty());
    }

    #[test]
    fn visible_products_follow_filters() {
        let (mut state, _store) = loaded_state();
        assert!(state.visible_products().is_none());

        state.dispatch(Action::SetCategory(Some("cleanser".to_string())));
        assert_eq!(state.visible_products().map(|products| products.len()), Some(2));

        state.dispatch(Action::SetSearch("foam".to_string()));
        let names: Vec<String> = state
            .visible_products()
            .unwrap_or_default()
            .into_iter()
            .map(|product| product.name)
            .collect();
        assert_eq!(names, vec!["Hydrating Cleanser", "Foaming Cleanser"]);

        state.dispatch(Action::SetCategory(None));
        state.dispatch(Action::SetSearch("lipstick".to_string()));
        assert_eq!(state.visible_products().map(|products| products.len()), Some(1));
    }

    #[test]
    fn generate_routine_with_selection_yields_send_effect() {
        let (mut state, _store) = loaded_state();
        assert_eq!(state.dispatch(Action::GenerateRoutine), None);

        state.dispatch(Action::ToggleSelection(sample()[1].key()));
        let effect = state.dispatch(Action::GenerateRoutine);
        assert!(matches!(effect, Some(Effect::SendTurn(_))));
        assert!(state.conversation().is_waiting());
    }

    #[test]
    fn failed_reply_keeps_transcript_and_shows_fallback() {
        let (mut state, _store) = loaded_state();
        let Some(Effect::SendTurn(turn)) = state.dispatch(Action::SendFollowUp("hi".to_string()))
        else {
            panic!("follow-up should produce a turn");
        };
        let transcript_before = state.conversation().transcript().to_vec();

        state.apply_event(AppEvent::AssistantReplied {
            turn,
            result: Err(BridgeError::Transport("offline".to_string())),
        });
        assert_eq!(state.conversation().transcript(), transcript_before.as_slice());
        assert_eq!(
            state.conversation().display().last(),
            Some(&ChatEntry::Notice(TRANSPORT_FALLBACK.to_string()))
        );
    }

    #[test]
    fn quiz_run_writes_result_into_chat_once() {
        let (mut state, _store) = loaded_state();
        state.dispatch(Action::StartQuiz);
        for option in [
            "Sensitive",
            "Acne",
            "Temperate",
            "A lot",
            "Poor",
            "Balanced",
            "No",
            "26-35",
        ] {
            state.dispatch(Action::AnswerQuiz(option.to_string()));
        }

        let quiz = state.quiz().expect("quiz should be active");
        assert_eq!(quiz.step(), QUESTION_COUNT);
        match state.conversation().display() {
            [ChatEntry::Assistant(text)] => {
                assert!(text.contains("Mineral sunscreen"));
                assert!(text.contains("Extra SPF protection"));
            }
            other => panic!("expected one quiz result entry, got {other:?}"),
        }

        state.dispatch(Action::AnswerQuiz("Oily".to_string()));
        assert_eq!(state.conversation().display().len(), 1);

        state.dispatch(Action::StartQuiz);
        let quiz = state.quiz().expect("quiz should be active");
        assert_eq!(quiz.step(), 0);
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn catalog_failure_is_recorded() {
        let mut state = AppState::new(Box::new(MemoryStore::new()));
        state.apply_event(AppEvent::CatalogLoaded(Err(CatalogError::Io {
            path: "products.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        })));
        assert!(matches!(state.catalog_status(), CatalogStatus::Failed(_)));
        assert!(state
            .diagnostics()
            .iter()
            .any(|line| line.contains("catalog load failed")));
    }

    #[test]
    fn filter_edits_skip_diagnostics_and_log_is_capped() {
        let (mut state, _store) = loaded_state();
        let before = state.diagnostics().len();
        for term in ["c", "cl", "cle"] {
            state.dispatch(Action::SetSearch(term.to_string()));
        }
        state.dispatch(Action::SetCategory(Some("cleanser".to_string())));
        assert_eq!(state.diagnostics().len(), before);

        for _ in 0..DIAGNOSTICS_CAP + 25 {
            state.dispatch(Action::ToggleDescription("Effaclar Duo".to_string()));
        }
        assert_eq!(state.diagnostics().len(), DIAGNOSTICS_CAP);
        assert!(state
            .diagnostics()
            .last()
            .is_some_and(|line| line.ends_with("toggle_description name=Effaclar Duo")));
    }
}
