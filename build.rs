//! Retrieves information about the version of the game from Git and the build
//! environment. [`shadow_rs`] writes it to the output directory and the crate
//! picks it up at compile time through `shadow!(build)`.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
