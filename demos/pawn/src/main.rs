use std::{env, path::Path};

use anyhow::{Context, bail};
use tyndustre::{
    App,
    pawn::{ASSET_DIR, PawnScene},
};

/// Where a development build finds `res/` when started from elsewhere, e.g. the workspace root
///
/// Release builds get no fallback; the build machine's path means nothing once installed
fn dev_asset_root() -> Option<&'static Path> {
    cfg!(debug_assertions).then(|| Path::new(env!("CARGO_MANIFEST_DIR")))
}

fn main() -> anyhow::Result<()> {
    if !Path::new(ASSET_DIR).is_dir() {
        let Some(root) = dev_asset_root() else {
            bail!("run the demo from the directory that contains `{ASSET_DIR}/`");
        };
        env::set_current_dir(root)
            .with_context(|| format!("no `{ASSET_DIR}/` under {}", root.display()))?;
    }

    App::new()
        .title("tyndustre 220919")
        .screen_size(512, 512)
        .target_fps(Some(60))
        .run::<PawnScene>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_only_in_debug_builds() {
        match dev_asset_root() {
            Some(root) => {
                assert!(cfg!(debug_assertions));
                assert!(root.join(ASSET_DIR).join("crosshair.png").is_file());
            }
            None => assert!(!cfg!(debug_assertions)),
        }
    }
}
