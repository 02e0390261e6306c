use anyhow::Result;
use crux_core::typegen::TypeGen;
use smart_fan_core::{
    events::{ControlEvent, StatusEvent, UiEvent},
    types::{MotorCommand, StepperDirection},
    App,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<ControlEvent>()?;
    gen.register_type::<StatusEvent>()?;
    gen.register_type::<UiEvent>()?;

    gen.register_type::<MotorCommand>()?;
    gen.register_type::<StepperDirection>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
