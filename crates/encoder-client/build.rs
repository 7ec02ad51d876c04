fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the proto file for the encoder client
    tonic_build::compile_protos("../../proto/encoder.proto")?;
    Ok(())
}
