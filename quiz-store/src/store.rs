use std::collections::{BTreeMap, BTreeSet};

use chrono::{FixedOffset, Utc};

use crate::error::Error;
use crate::model::{
    AnswerKind, AnswerSubmission, DataCounts, MediaItem, MediaUpload, PhoneRecord,
    PhoneRegistration, Question, Stats, StudentAnswer,
};

/// Offset of the deployment locale used for record dates.
const LOCAL_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Record dates are human-readable strings; clients display them verbatim
/// and never parse them.
fn local_timestamp() -> String {
    let offset = FixedOffset::east_opt(LOCAL_OFFSET_SECS).expect("static offset is in range");
    Utc::now()
        .with_timezone(&offset)
        .format("%-d/%-m/%Y, %-I:%M:%S %P")
        .to_string()
}

/// All quiz data for the lifetime of the process. The service owns one
/// instance behind a lock; every operation is a synchronous in-memory step.
pub struct QuizStore {
    reset_password: String,
    next_id: i64,
    questions: Vec<Question>,
    answers: Vec<StudentAnswer>,
    media: Vec<MediaItem>,
    phones: BTreeMap<String, PhoneRecord>,
}

impl QuizStore {
    pub fn new(reset_password: impl Into<String>) -> Self {
        Self {
            reset_password: reset_password.into(),
            // Seeded from the clock so ids stay unique across restarts.
            next_id: Utc::now().timestamp_millis(),
            questions: Vec::new(),
            answers: Vec::new(),
            media: Vec::new(),
            phones: BTreeMap::new(),
        }
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Appends a new question with no answer. When a non-empty `answer`
    /// accompanies the request and a previous question exists, that answer
    /// is first written onto the previous question ("reveal previous
    /// answer, ask next question").
    pub fn create_question(
        &mut self,
        question: String,
        answer: Option<String>,
    ) -> Result<Question, Error> {
        if question.is_empty() {
            return Err(Error::Validation("Question is required".into()));
        }

        if let Some(answer) = answer.filter(|a| !a.is_empty()) {
            if let Some(previous) = self.questions.last_mut() {
                previous.answer = Some(answer);
            }
        }

        let new_question = Question {
            id: self.next_id(),
            question,
            answer: None,
            date: local_timestamp(),
        };
        self.questions.push(new_question.clone());
        Ok(new_question)
    }

    pub fn question(&self, id: i64) -> Result<&Question, Error> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| Error::NotFound("Question not found".into()))
    }

    /// Overwrites the answer on the matching question unconditionally; a
    /// `None` value clears it back to null.
    pub fn set_answer(&mut self, id: i64, answer: Option<String>) -> Result<Question, Error> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| Error::NotFound("Question not found".into()))?;
        question.answer = answer;
        Ok(question.clone())
    }

    pub fn reset_questions(&mut self) {
        self.questions.clear();
    }

    pub fn answers(&self) -> &[StudentAnswer] {
        &self.answers
    }

    pub fn answers_for_question(&self, question_id: i64) -> Vec<StudentAnswer> {
        self.answers
            .iter()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect()
    }

    /// Appends a student answer. At most one answer may exist per
    /// `(question_id, student_pin, kind)` triple; `question_id` is taken
    /// as-is and never checked against the question collection.
    pub fn submit_answer(&mut self, submission: AnswerSubmission) -> Result<StudentAnswer, Error> {
        if submission.question_id == 0
            || submission.student_pin.is_empty()
            || submission.student_name.is_empty()
            || submission.answer.is_empty()
        {
            return Err(Error::Validation("All fields are required".into()));
        }

        let duplicate = self.answers.iter().any(|a| {
            a.question_id == submission.question_id
                && a.student_pin == submission.student_pin
                && a.kind == submission.kind
        });
        if duplicate {
            return Err(Error::DuplicateSubmission(
                "You have already answered this".into(),
            ));
        }

        let answer = StudentAnswer {
            id: self.next_id(),
            question_id: submission.question_id,
            student_pin: submission.student_pin,
            student_name: submission.student_name,
            answer: submission.answer,
            kind: submission.kind,
            date: local_timestamp(),
        };
        self.answers.push(answer.clone());
        Ok(answer)
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn upload_media(&mut self, upload: MediaUpload) -> Result<MediaItem, Error> {
        if upload.kind.is_empty()
            || upload.data.is_empty()
            || upload.file_name.is_empty()
            || upload.opinion.is_empty()
        {
            return Err(Error::Validation("All fields are required".into()));
        }

        let item = MediaItem {
            id: self.next_id(),
            kind: upload.kind,
            data: upload.data,
            file_name: upload.file_name,
            opinion: upload.opinion,
            date: local_timestamp(),
        };
        self.media.push(item.clone());
        Ok(item)
    }

    pub fn latest_media(&self) -> Result<&MediaItem, Error> {
        self.media
            .last()
            .ok_or_else(|| Error::NotFound("No media files found".into()))
    }

    pub fn delete_media(&mut self, id: i64) -> Result<(), Error> {
        let index = self
            .media
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Error::NotFound("Media not found".into()))?;
        self.media.remove(index);
        Ok(())
    }

    pub fn phones(&self) -> &BTreeMap<String, PhoneRecord> {
        &self.phones
    }

    /// Upserts the record under `pin`, stamping a fresh `last_login`.
    /// Prior values are overwritten without history.
    pub fn register_phone(&mut self, registration: PhoneRegistration) -> Result<(), Error> {
        if registration.pin.is_empty()
            || registration.name.is_empty()
            || registration.phone.is_empty()
        {
            return Err(Error::Validation("All fields are required".into()));
        }

        self.phones.insert(
            registration.pin,
            PhoneRecord {
                name: registration.name,
                phone: registration.phone,
                last_login: local_timestamp(),
            },
        );
        Ok(())
    }

    pub fn stats(&self) -> Stats {
        let unique_students = self
            .answers
            .iter()
            .map(|a| a.student_pin.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let question_answers = self
            .answers
            .iter()
            .filter(|a| a.kind == AnswerKind::Question)
            .count();

        Stats {
            total_questions: self.questions.len(),
            total_answers: self.answers.len(),
            total_media: self.media.len(),
            total_students: self.phones.len(),
            unique_students,
            latest_question_date: self.questions.last().map(|q| q.date.clone()),
            latest_media_date: self.media.last().map(|m| m.date.clone()),
            question_answers,
            media_answers: self.answers.len() - question_answers,
        }
    }

    /// Clears all four collections. `confirm` must equal the configured
    /// reset password exactly; on mismatch nothing is touched.
    pub fn reset_all(&mut self, confirm: &str) -> Result<(), Error> {
        if confirm != self.reset_password {
            return Err(Error::Forbidden("Incorrect confirmation password".into()));
        }

        self.questions.clear();
        self.answers.clear();
        self.media.clear();
        self.phones.clear();
        Ok(())
    }

    pub fn counts(&self) -> DataCounts {
        DataCounts {
            questions: self.questions.len(),
            answers: self.answers.len(),
            media: self.media.len(),
            students: self.phones.len(),
        }
    }
}
