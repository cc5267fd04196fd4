use serde::{Deserialize, Serialize};

/// A posted question. `answer` stays `None` until it is revealed, either
/// explicitly or by the arrival of the next question.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: Option<String>,
    pub date: String,
}

/// Discriminator between a plain-question answer and a media-response
/// answer. Serialized on the wire as `type`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    #[default]
    Question,
    Media,
}

/// A student's submitted answer. `question_id` is not checked against the
/// question collection; any id the client sends is stored as-is.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudentAnswer {
    pub id: i64,
    #[serde(rename = "questionId")]
    pub question_id: i64,
    #[serde(rename = "studentPin")]
    pub student_pin: String,
    #[serde(rename = "studentName")]
    pub student_name: String,
    pub answer: String,
    #[serde(rename = "type", default)]
    pub kind: AnswerKind,
    pub date: String,
}

/// An uploaded media file with its payload inline (e.g. base64).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub opinion: String,
    pub date: String,
}

/// A student's registered phone number, keyed by pin in the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub name: String,
    pub phone: String,
    #[serde(rename = "lastLogin")]
    pub last_login: String,
}

/// Body of an answer submission. Missing fields deserialize to their empty
/// defaults and are rejected by the store's required-field check.
#[derive(Clone, Debug, Deserialize)]
pub struct AnswerSubmission {
    #[serde(rename = "questionId", default)]
    pub question_id: i64,
    #[serde(rename = "studentPin", default)]
    pub student_pin: String,
    #[serde(rename = "studentName", default)]
    pub student_name: String,
    #[serde(default)]
    pub answer: String,
    #[serde(rename = "type", default)]
    pub kind: AnswerKind,
}

/// Body of a media upload.
#[derive(Clone, Debug, Deserialize)]
pub struct MediaUpload {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: String,
    #[serde(rename = "fileName", default)]
    pub file_name: String,
    #[serde(default)]
    pub opinion: String,
}

/// Body of a phone registration.
#[derive(Clone, Debug, Deserialize)]
pub struct PhoneRegistration {
    #[serde(default)]
    pub pin: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// On-demand aggregation over the live collections.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    #[serde(rename = "totalAnswers")]
    pub total_answers: usize,
    #[serde(rename = "totalMedia")]
    pub total_media: usize,
    #[serde(rename = "totalStudents")]
    pub total_students: usize,
    #[serde(rename = "uniqueStudents")]
    pub unique_students: usize,
    #[serde(rename = "latestQuestionDate")]
    pub latest_question_date: Option<String>,
    #[serde(rename = "latestMediaDate")]
    pub latest_media_date: Option<String>,
    #[serde(rename = "questionAnswers")]
    pub question_answers: usize,
    #[serde(rename = "mediaAnswers")]
    pub media_answers: usize,
}

/// Per-collection record counts, reported by the health endpoint.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DataCounts {
    pub questions: usize,
    pub answers: usize,
    pub media: usize,
    pub students: usize,
}
