/// A yes/no question about one movie's rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Raw poster bytes as downloaded.
    pub image_data: Vec<u8>,
    /// Title of the movie on the poster.
    pub title: String,
    pub text: String,
    /// Whether "yes" is the right answer.
    pub correct_answer: bool,
}

impl Question {
    /// Correctness of a player's answer: "yes" passes the flag through,
    /// "no" negates it.
    pub fn is_correct(&self, yes: bool) -> bool {
        if yes {
            self.correct_answer
        } else {
            !self.correct_answer
        }
    }
}
