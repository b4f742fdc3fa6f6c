/// One row of the `consumer_feedback` table. Written at most once per
/// shift, when the shift is closed with non-empty feedback text.
#[derive(Debug, Clone)]
pub struct ConsumerFeedback {
    pub feedback_id: i64,
    pub shift_log_id: i64,
    pub consumer_question: String,
    pub consumer_feedback: String,
}
