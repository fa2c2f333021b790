use tyndustre::{App, pixel_camera::PixelCameraScene};

fn main() -> anyhow::Result<()> {
    App::new()
        .title("tyndustre - smooth pixel-perfect camera")
        .screen_size(800, 450)
        .target_fps(Some(60))
        .run::<PixelCameraScene>()?;
    Ok(())
}
