fn main() -> Result<(), Box<dyn std::error::Error>> {
    mahoraga::cli::main()
}
