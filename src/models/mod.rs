mod game_result;
mod movie;
mod question;
mod view;

pub use game_result::{current_timestamp, GameResult, DATE_FORMAT};
pub use movie::{MostPopularMovies, MovieRecord};
pub use question::Question;
pub use view::{Notice, NoticeAction, QuizStep};
