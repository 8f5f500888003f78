//! Real-hardware scan example
//!
//! Requires the vendor SDK installed; point NBIO_SDK_DIR at the directory
//! holding NBioBSP.dll and NITGEN.SDK.NBioBSP.dll.

use nbiobsp::Device;

fn main() -> nbiobsp::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let dir = std::env::var("NBIO_SDK_DIR").unwrap_or_else(|_| ".".to_string());

    let mut device = Device::load(dir)?;
    device.open_device(None)?;
    println!("Device opened, place a finger on the scanner...");

    let fir = device.capture()?;
    println!("Captured template {}", fir);

    let text = device.template_to_text(fir, false, None)?;
    println!("Text encoding ({} bytes):\n{}", text.len(), text.text_fir);

    device.close_device(None)?;
    println!("Done");

    Ok(())
}
