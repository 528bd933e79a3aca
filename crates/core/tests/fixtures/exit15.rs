use std::io::Write;

fn main() {
    print!("STDOUT: Exiting 15");
    eprint!("STDERR: Exiting 15");
    std::io::stdout().flush().unwrap();
    std::process::exit(15);
}
