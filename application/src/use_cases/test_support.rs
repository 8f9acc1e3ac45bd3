//! Hand-written port mocks shared by the use case tests

use crate::ports::connectivity::ConnectivityProbe;
use crate::ports::content_extractor::{ContentExtractor, ExtractionError};
use crate::ports::file_store::{FileStore, FileStoreError};
use crate::ports::llm_gateway::{ChatMessage, GatewayError, LocalModelRuntime, RemoteModelGateway};
use crate::ports::question_repository::{QuestionRepository, RepositoryError, SettingsRepository};
use async_trait::async_trait;
use casequery_domain::{DocumentKind, Model, ModelSequence, ProviderFamily, Question, renumber};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub fn quota_error() -> GatewayError {
    GatewayError::RequestFailed(
        "HTTP 429 Too Many Requests: You exceeded your current quota".to_string(),
    )
}

// ==================== Connectivity ====================

/// Probe answering from a script; the last answer repeats
pub struct ScriptedProbe {
    answers: Mutex<VecDeque<bool>>,
    last: Mutex<bool>,
    calls: Mutex<usize>,
}

impl ScriptedProbe {
    pub fn new(online: bool) -> Self {
        Self::sequence(vec![online])
    }

    pub fn sequence(answers: Vec<bool>) -> Self {
        let last = answers.last().copied().unwrap_or(true);
        Self {
            answers: Mutex::new(answers.into()),
            last: Mutex::new(last),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ConnectivityProbe for ScriptedProbe {
    async fn is_reachable(&self) -> bool {
        *self.calls.lock().unwrap() += 1;
        match self.answers.lock().unwrap().pop_front() {
            Some(answer) => {
                *self.last.lock().unwrap() = answer;
                answer
            }
            None => *self.last.lock().unwrap(),
        }
    }
}

// ==================== Models ====================

/// Remote gateway with a fixed answer or error per model id
pub struct ScriptedRemote {
    script: HashMap<String, Result<String, GatewayError>>,
    calls: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self {
            script: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(mut self, model: &str, text: &str) -> Self {
        self.script.insert(model.to_string(), Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, model: &str, error: GatewayError) -> Self {
        self.script.insert(model.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteModelGateway for ScriptedRemote {
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        _temperature: f32,
    ) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(model.to_string());
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .get(model.as_str())
            .cloned()
            .unwrap_or_else(|| Err(GatewayError::RequestFailed(format!("unknown model {model}"))))
    }
}

/// Local runtime with a fixed answer or error
pub struct ScriptedLocal {
    answer: Result<String, GatewayError>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLocal {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(GatewayError::ConnectionError(message.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.calls.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LocalModelRuntime for ScriptedLocal {
    async fn chat(
        &self,
        _model: &Model,
        messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.answer.clone()
    }
}

// ==================== Extraction ====================

/// Extractor that decodes bytes lossily and tags the kind
pub struct EchoExtractor;

impl ContentExtractor for EchoExtractor {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
        Ok(format!("[{}] {}", kind.as_str(), String::from_utf8_lossy(bytes)))
    }
}

// ==================== Files ====================

/// In-memory file tree
#[derive(Default)]
pub struct MemoryFileStore {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
    denied: Mutex<Vec<PathBuf>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = PathBuf::from(path);
        self.add_ancestors(&path);
        self.files
            .lock()
            .unwrap()
            .insert(path, content.as_bytes().to_vec());
        self
    }

    pub fn with_dir(self, path: &str) -> Self {
        let path = PathBuf::from(path);
        self.add_ancestors(&path);
        self.dirs.lock().unwrap().insert(path);
        self
    }

    /// Make every write, copy, move or delete under `prefix` fail
    pub fn deny(&self, prefix: &str) {
        self.denied.lock().unwrap().push(PathBuf::from(prefix));
    }

    pub fn exists(&self, path: &str) -> bool {
        let path = Path::new(path);
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }

    pub fn text(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(Path::new(path))
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn files_under(&self, prefix: &str) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn add_ancestors(&self, path: &Path) {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    fn check_allowed(&self, operation: &'static str, path: &Path) -> Result<(), FileStoreError> {
        if self.denied.lock().unwrap().iter().any(|d| path.starts_with(d)) {
            return Err(FileStoreError::io(operation, path, "permission denied"));
        }
        Ok(())
    }
}

impl FileStore for MemoryFileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FileStoreError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| FileStoreError::NotFound(path.to_path_buf()))
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), FileStoreError> {
        self.check_allowed("write", path)?;
        self.add_ancestors(path);
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), text.as_bytes().to_vec());
        Ok(())
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<(), FileStoreError> {
        self.check_allowed("move", to)?;
        let content = self.read(from)?;
        self.add_ancestors(to);
        let mut files = self.files.lock().unwrap();
        files.remove(from);
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FileStoreError> {
        self.check_allowed("copy", to)?;
        let content = self.read(from)?;
        self.add_ancestors(to);
        self.files.lock().unwrap().insert(to.to_path_buf(), content);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FileStoreError> {
        self.check_allowed("create", path)?;
        self.add_ancestors(path);
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), FileStoreError> {
        self.check_allowed("remove", path)?;
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn list_subdirectories(&self, root: &Path) -> Result<Vec<PathBuf>, FileStoreError> {
        Ok(self
            .dirs
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.parent() == Some(root))
            .cloned()
            .collect())
    }

    fn walk_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FileStoreError> {
        Ok(self.files_under(&dir.to_string_lossy()))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
}

// ==================== Stores ====================

pub struct MemoryQuestions {
    family: ProviderFamily,
    questions: Mutex<Vec<Question>>,
}

impl MemoryQuestions {
    pub fn new(family: ProviderFamily, texts: &[&str]) -> Self {
        let questions = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Question::new(i as u32 + 1, *t))
            .collect();
        Self {
            family,
            questions: Mutex::new(questions),
        }
    }
}

impl QuestionRepository for MemoryQuestions {
    fn family(&self) -> ProviderFamily {
        self.family
    }

    fn list(&self) -> Result<Vec<Question>, RepositoryError> {
        Ok(self.questions.lock().unwrap().clone())
    }

    fn add(&self, text: &str) -> Result<Question, RepositoryError> {
        let text = Question::validate_text(text)
            .ok_or_else(|| RepositoryError::InvalidInput("empty question".into()))?;
        let mut questions = self.questions.lock().unwrap();
        let question = Question::new(questions.len() as u32 + 1, text);
        questions.push(question.clone());
        Ok(question)
    }

    fn update(&self, id: u32, text: &str) -> Result<Question, RepositoryError> {
        let mut questions = self.questions.lock().unwrap();
        let question = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(RepositoryError::NotFound {
                family: self.family,
                id,
            })?;
        question.text = text.to_string();
        Ok(question.clone())
    }

    fn delete(&self, id: u32) -> Result<(), RepositoryError> {
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Err(RepositoryError::NotFound {
                family: self.family,
                id,
            });
        }
        renumber(&mut questions);
        Ok(())
    }

    fn renumber(&self) -> Result<(), RepositoryError> {
        renumber(&mut self.questions.lock().unwrap());
        Ok(())
    }
}

/// Settings store whose sequence can be edited between calls
#[derive(Default)]
pub struct MemorySettings {
    sequence: Mutex<Option<ModelSequence>>,
    reads: Mutex<usize>,
}

impl MemorySettings {
    pub fn with_sequence(ids: &[&str]) -> Self {
        Self {
            sequence: Mutex::new(Some(ModelSequence::parse(ids))),
            reads: Mutex::new(0),
        }
    }

    pub fn read_count(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

impl SettingsRepository for MemorySettings {
    fn load_model_sequence(&self) -> Result<Option<ModelSequence>, RepositoryError> {
        *self.reads.lock().unwrap() += 1;
        Ok(self.sequence.lock().unwrap().clone())
    }

    fn save_model_sequence(&self, sequence: &ModelSequence) -> Result<(), RepositoryError> {
        *self.sequence.lock().unwrap() = Some(sequence.clone());
        Ok(())
    }
}
