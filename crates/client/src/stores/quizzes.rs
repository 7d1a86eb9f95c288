//! Quiz slices: quizzes live nested under course/module/lesson paths.

use dioxus::prelude::*;
use learnhub_shared::{CreateQuizRequest, QuizDto, QuizResultDto, QuizSubmission};

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

/// Address of one lesson's quiz collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPath {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
}

impl LessonPath {
    pub fn new(
        course_id: impl Into<String>,
        module_id: impl Into<String>,
        lesson_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            module_id: module_id.into(),
            lesson_id: lesson_id.into(),
        }
    }

    pub fn quizzes_path(&self) -> String {
        format!(
            "/courses/{}/modules/{}/lessons/{}/quizzes",
            self.course_id, self.module_id, self.lesson_id
        )
    }
}

pub static QUIZZES: GlobalSignal<Slice<Vec<QuizDto>>> = Signal::global(Slice::new);
pub static QUIZ_RESULT: GlobalSignal<Slice<QuizResultDto>> = Signal::global(Slice::new);

pub fn fetch_quizzes(auth: &AuthContext, lesson: &LessonPath) {
    let ticket = QUIZZES.write().begin();
    let client = auth.client();
    let path = lesson.quizzes_path();

    spawn(async move {
        match client.get_json::<Vec<QuizDto>>(&path).await {
            Ok(quizzes) => {
                QUIZZES.write().fulfill(ticket, quizzes);
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                QUIZZES.write().reject(ticket, message);
            }
        }
    });
}

/// Submit answers for one quiz; result lands in [`QUIZ_RESULT`].
pub fn submit_quiz(auth: &AuthContext, quiz_id: String, submission: QuizSubmission) {
    if submission.answers.is_empty() {
        toasts::warning("Answer at least one question first");
        return;
    }

    let ticket = QUIZ_RESULT.write().begin();
    let client = auth.client();

    spawn(async move {
        match client
            .post_json::<_, QuizResultDto>(&format!("/quizzes/{quiz_id}/submit"), &submission)
            .await
        {
            Ok(result) => {
                QUIZ_RESULT.write().fulfill(ticket, result);
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                QUIZ_RESULT.write().reject(ticket, message);
            }
        }
    });
}

/// Instructor surface: create a quiz under a lesson, then refresh.
pub fn create_quiz(auth: &AuthContext, lesson: LessonPath, request: CreateQuizRequest) {
    if request.title.trim().is_empty() || request.questions.is_empty() {
        toasts::warning("A quiz needs a title and at least one question");
        return;
    }

    let client = auth.client();
    let auth = *auth;
    let path = lesson.quizzes_path();

    spawn(async move {
        match client.post_json::<_, QuizDto>(&path, &request).await {
            Ok(created) => {
                toasts::success(format!("Quiz \"{}\" created", created.title));
                fetch_quizzes(&auth, &lesson);
            }
            Err(err) => toasts::error(err.user_message()),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quizzes_path_nests_course_module_lesson() {
        let lesson = LessonPath::new("c1", "m2", "l3");
        assert_eq!(
            lesson.quizzes_path(),
            "/courses/c1/modules/m2/lessons/l3/quizzes"
        );
    }
}
