//! Capture-and-match walkthrough against the fake backend (no hardware)

use nbiobsp::{Device, FakeSdk};

fn main() -> nbiobsp::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut sdk = FakeSdk::new();
    sdk.set_finger_present(true);
    sdk.set_match_result(true);

    let mut device = Device::with_backend(Box::new(sdk));

    device.open_device(None)?;
    println!("✓ Device opened");

    if device.check_finger()? {
        println!("✓ Finger detected");
    }

    let first = device.capture()?;
    let second = device.capture()?;
    println!("✓ Captured {} and {}", first, second);

    let same = device.match_templates(first, second)?;
    println!("✓ Match result: {}", same);

    let text = device.template_to_text(first, false, None)?;
    println!("✓ Text encoding: {} ({})", text.text_fir, text);

    let restored = Device::text_to_template(text.text_fir);
    println!("✓ Restored payload ({} bytes)", restored.len());

    device.close_device(None)?;
    println!("✓ Device closed");

    Ok(())
}
