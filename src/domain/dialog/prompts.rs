//! Spoken prompt texts, grouped by slot.
//!
//! Texts may carry SSML markup; the transport passes them to speech
//! synthesis untouched.

/// Session launch.
pub mod launch {
    pub const SPEECH: &str = "Welcome to the Student Advising Assistant! \
        Do you want to ask a general question or a program-specific question?";
    pub const REPROMPT: &str = "Please tell me what type of question you want to ask.";
}

/// Question scope collection.
pub mod scope {
    pub const FIRST_QUESTION: &str = "OK. Now please tell me your faculty.";
    pub const FIRST_SPECIFIC_QUESTION: &str = "OK. Please tell me your field of study.";
    pub const NEXT_TOPIC: &str = "OK. Please tell me the topic of your question.";
    pub const ASK_AGAIN: &str = "Sorry, I didn't get that. Please tell me if you want to \
        ask a general question or program-specific question.";
}

/// Faculty collection.
pub mod faculty {
    pub const REPROMPT: &str = "What is your program?";
    pub const ASK_AGAIN: &str = "Sorry, I didn't get that. Please tell me your faculty again.";

    pub fn confirmed(name: &str) -> String {
        format!("Your faculty is {}. What is your program?", name)
    }
}

/// Program collection.
pub mod program {
    pub const ASK_AGAIN: &str = "Sorry, I didn't get that. Please tell me your program again.";

    pub fn confirmed_general(name: &str) -> String {
        format!("Your program is {}. What is the topic of your question?", name)
    }

    pub fn confirmed_specific(name: &str) -> String {
        format!("Your program is {}. What is your field of study?", name)
    }
}

/// Specialization narrowing and choice.
pub mod specialization {
    pub const ASK_AGAIN: &str = "Sorry, I could not find any specialization that matches \
        your input. Please try again.";
    pub const CHOOSE: &str = "I have loaded the specialization options. \
        Please tell me your specialization.";
    pub const CHOICE_ASK_AGAIN: &str =
        "Sorry, I didn't get that. Please tell me your specialization again.";

    pub fn confirmed(name: &str) -> String {
        format!("Your specialization is {}. What is your year level?", name)
    }

    pub fn choice_confirmed(name: &str) -> String {
        format!("Your specialization is {}. Please tell me your year level.", name)
    }
}

/// Year-level collection.
pub mod year_level {
    pub const REPROMPT: &str = "Please tell me your year level.";
    pub const ASK_AGAIN: &str = "Sorry, I didn't get that. Please tell me your year level again.";

    pub fn confirmed(year: &str) -> String {
        format!(
            "You are currently in your {}. Now please tell me the topic of your question.",
            year
        )
    }
}

/// Topic collection.
pub mod topic {
    pub fn confirmed(topic: &str) -> String {
        format!("Your topic is {}. Please tell me your question.", topic)
    }
}

/// Question capture and the answer pipeline.
pub mod question {
    pub const ASK: &str = "Please tell me your question.";
    pub const ACKNOWLEDGMENT: &str = "Your question has been recorded. Please wait a moment \
        while I generate the answer. <break time='10s' /> The answer is ready. \
        Please ask 'check answer' to check the answer.";
    pub const ANSWER_READY: &str =
        "Your answer is ready. Please ask 'check answer' to check your answer.";
}

/// Check-answer flow.
pub mod check_answer {
    pub const NOT_FOUND: &str = "Sorry, I could not find any answer for your question.";
    pub const FOLLOW_UP: &str = "<break time='3s' /> Do you want to ask another question?";
}

/// Ask-another-question continuation.
pub mod continuation {
    pub const ASK_AGAIN: &str = "Sorry, I didn't get that. Please answer either yes or no.";
    pub const FAREWELL: &str = "Thank you for using the Student Advising Assistant. Goodbye!";
    pub const NEXT_QUESTION: &str = "Great! Please tell me if you want to ask a general \
        question or a program specific question.";
}

/// Remote collaborator failures.
pub mod failure {
    pub const SERVICE_UNAVAILABLE: &str = "Sorry, I'm having trouble reaching the advising \
        service right now. Please try again in a moment.";
    pub const NO_OPTIONS: &str = "Sorry, I could not find any options for that right now. \
        Please try again.";
    pub const LOOKUP_FAILED: &str = "Sorry, I could not get your answer in time. You can ask \
        'check answer' to see what I found, or try your question again later.";
}
