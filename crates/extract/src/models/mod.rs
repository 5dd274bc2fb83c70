mod byline;
mod calling;
mod record;
mod season;
mod url;

pub use self::byline::Byline;
pub use self::calling::{Calling, UNRANKED};
pub use self::record::TalkRecord;
pub use self::season::Season;
pub use self::url::{MediaUrl, UrlKind};
