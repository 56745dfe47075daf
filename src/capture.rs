use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::convert::{self, Converter};

/// Screenshot grabber.
pub const GRABBER: &str = "grim";

/// Grab the selected region and extract its pixel color as a hex string.
///
/// Sleeps `delay` seconds first so the selection overlay has been torn down
/// before the frame is grabbed; the compositor offers no signal for that,
/// only time. A grabber or converter that misbehaves degrades to whatever
/// string its output yields, possibly the empty string.
pub fn sample_pixel(region: &str, converter: Converter, delay: f64) -> Result<String> {
    if delay > 0.0 {
        thread::sleep(Duration::from_secs_f64(delay));
    }

    let mut grab = Command::new(GRABBER);
    grab.args(["-g", region, "-t", "png", "-"]);
    run_pipeline(grab, converter)
}

/// Run the grabber with its PNG output piped straight into the converter,
/// the one place two tools run concurrently.
fn run_pipeline(mut grab: Command, converter: Converter) -> Result<String> {
    grab.stdout(Stdio::piped()).stderr(Stdio::null());
    debug!("running {:?}", grab);
    let mut grabber = grab
        .spawn()
        .with_context(|| format!("failed to run screenshot grabber ({GRABBER})"))?;

    match converter.command() {
        Some(mut convert_cmd) => {
            let png_stream = grabber
                .stdout
                .take()
                .context("screenshot grabber has no stdout")?;
            convert_cmd
                .stdin(Stdio::from(png_stream))
                .stdout(Stdio::piped())
                .stderr(Stdio::null());
            debug!("running {:?}", convert_cmd);

            let output = match convert_cmd.output() {
                Ok(output) => output,
                Err(err) => {
                    let _ = grabber.kill();
                    let _ = grabber.wait();
                    return Err(anyhow::Error::new(err).context(format!(
                        "failed to run pixel converter {:?}",
                        convert_cmd.get_program()
                    )));
                }
            };
            let grab_status = grabber
                .wait()
                .context("failed to wait for screenshot grabber")?;
            if !grab_status.success() {
                warn!("screenshot grabber exited with {grab_status}");
            }
            if !output.status.success() {
                warn!("pixel converter exited with {}", output.status);
            }

            let text = String::from_utf8_lossy(&output.stdout);
            Ok(converter.extract(text.lines().last().unwrap_or("")))
        }
        None => {
            let output = grabber
                .wait_with_output()
                .context("failed to wait for screenshot grabber")?;
            if !output.status.success() {
                warn!("screenshot grabber exited with {}", output.status);
            }
            Ok(convert::decode_pixel(&output.stdout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    #[cfg(unix)]
    fn builtin_pipeline_decodes_a_real_capture() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::RgbImage::from_pixel(1, 1, image::Rgb([0xab, 0xcd, 0xef]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let capture_file = dir.path().join("capture.png");
        std::fs::write(&capture_file, &png).unwrap();

        let mut grab = Command::new("cat");
        grab.arg(&capture_file);
        let color = run_pipeline(grab, Converter::Builtin).unwrap();
        assert_eq!(color, "#abcdef");
    }

    #[test]
    #[cfg(unix)]
    fn builtin_pipeline_degrades_to_empty_on_bad_capture() {
        let dir = tempfile::tempdir().unwrap();
        let tool = crate::tools::fake_tool(dir.path(), "grabber", "echo not-a-png; exit 1");

        let color = run_pipeline(Command::new(&tool), Converter::Builtin).unwrap();
        assert_eq!(color, "");
    }

    #[test]
    fn missing_grabber_is_an_error() {
        let grab = Command::new("/nonexistent/no-such-grabber");
        assert!(run_pipeline(grab, Converter::Builtin).is_err());
    }
}
