mod genre;
mod movie;
mod quiz;

pub use genre::{Genre, GenreVerdict};
pub use movie::{
    CandidateMovie, CastMember, Credits, DiscoverResponse, DiscoveryFilters, ImageConfiguration,
    ImageSettings, MovieDetails, Recommendation, SortOrder, Video, VideoList,
};
pub use quiz::{AgeBand, AnswerSet, Mood};
