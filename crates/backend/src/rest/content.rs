use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use lesson_core::model::{
    DifficultyLevel, MatchPair, Module, ModuleCategory, ModuleId, Question, QuestionId,
};

use super::RestConfig;
use crate::content::{ContentError, ContentProvider};

/// REST adapter for the content service.
#[derive(Clone)]
pub struct RestContentClient {
    client: Client,
    config: RestConfig,
}

impl RestContentClient {
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ContentProvider for RestContentClient {
    async fn module_by_id(&self, id: ModuleId) -> Result<Module, ContentError> {
        let url = self.config.endpoint(&format!("modules/{id}"));
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ContentError::HttpStatus(response.status()));
        }

        let dto: ModuleDto = response.json().await?;
        dto.into_module()
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

/// Module payload as served by the content service.
#[derive(Debug, Deserialize)]
struct ModuleDto {
    id: ModuleId,
    title: String,
    description: String,
    #[serde(rename = "type")]
    module_type: String,
    difficulty_level: u8,
    #[serde(default)]
    estimated_duration_minutes: u32,
    #[serde(default)]
    questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
struct QuestionDto {
    id: QuestionId,
    question_text: String,
    question_type: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    media_url: Option<String>,
    #[serde(default)]
    hints: Option<Vec<String>>,
    #[serde(default)]
    matching_pairs: Option<Vec<MatchPairDto>>,
}

#[derive(Debug, Deserialize)]
struct MatchPairDto {
    left: String,
    right: String,
}

impl ModuleDto {
    fn into_module(self) -> Result<Module, ContentError> {
        let category: ModuleCategory = self
            .module_type
            .parse()
            .map_err(|e: lesson_core::model::ModuleError| ContentError::Invalid(e.to_string()))?;
        let difficulty = DifficultyLevel::new(self.difficulty_level)
            .map_err(|e| ContentError::Invalid(e.to_string()))?;

        let questions = self
            .questions
            .into_iter()
            .map(QuestionDto::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        Module::new(
            self.id,
            self.title,
            self.description,
            category,
            difficulty,
            self.estimated_duration_minutes,
            questions,
        )
        .map_err(|e| ContentError::Invalid(e.to_string()))
    }
}

impl QuestionDto {
    fn into_question(self) -> Result<Question, ContentError> {
        let media = self
            .media_url
            .map(|raw| Url::parse(&raw))
            .transpose()
            .map_err(|e| ContentError::Invalid(format!("media url: {e}")))?;

        let question = if self.question_type == "matching" {
            let pairs = self
                .matching_pairs
                .unwrap_or_default()
                .into_iter()
                .map(|p| MatchPair::new(p.left, p.right))
                .collect();
            Question::matching(self.id, self.question_text, pairs, media)
        } else {
            let options = self.options.unwrap_or_default();
            let correct = self
                .correct_answer
                .ok_or_else(|| ContentError::Invalid("missing correct_answer".into()))?;
            Question::choice(self.id, self.question_text, options, correct, media)
        }
        .map_err(|e| ContentError::Invalid(e.to_string()))?;

        Ok(match self.hints {
            Some(hints) => question.with_hints(hints),
            None => question,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
