//! Built-in movie catalog indexed at startup

use crate::storage::Movie;

/// The fixed set of movies the assistant may recommend
pub fn movie_catalog() -> Vec<Movie> {
    vec![
        Movie::new(
            1,
            "The Matrix",
            "A computer hacker learns from mysterious rebels about the true nature of his reality and his role in the war against its controllers.",
        ),
        Movie::new(
            2,
            "Inception",
            "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.",
        ),
        Movie::new(
            3,
            "Interstellar",
            "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
        ),
    ]
}
