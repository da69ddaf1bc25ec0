//! Demo: a portrait window with thirty rows riding over a paged banner.
//!
//! Run the binary as-is for the procedural banner, or pass an image path to
//! show it on the banner instead. Scroll with the wheel or drag the rows;
//! tap the exposed banner to flip its page.

use anyhow::Context;
use scrim::{platform, Pixmap, ScreenConfig};

fn main() -> anyhow::Result<()> {
    let mut config = ScreenConfig::new()
        .size(480, 800)
        .header_height(280)
        .row_height(56)
        .items((1..=30).map(|i| format!("Test Item {i}")).collect());

    if let Some(path) = std::env::args().nth(1) {
        let image = image::open(&path)
            .with_context(|| format!("failed to load banner image {path}"))?
            .to_rgba8();
        config = config.header_image(Pixmap::from_image(image));
    }

    platform::run(config)?;
    Ok(())
}
