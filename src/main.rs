use clap::{arg, crate_version, Command};
use lzss_stream::{compress_slice, Error};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Examples:
---------
Compress a file: `lzss-stream compress -i firmware.bin -o firmware.lzss`";

    let main_cmd = Command::new("lzss-stream")
        .about("Tree-indexed LZSS stream compressor")
        .after_long_help(long_help)
        .version(crate_version!())
        .subcommand(Command::new("compress")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .about("compress a file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let dat = std::fs::read(path_in)?;
        log::info!("read {} bytes from {}", dat.len(), path_in);
        let compressed: Vec<u8> = compress_slice(&dat).map_err(|e: Error| Box::new(e) as Box<dyn std::error::Error>)?;
        log::info!("compressed to {} bytes", compressed.len());
        std::fs::write(path_out, compressed)?;
    }

    Ok(())
}
