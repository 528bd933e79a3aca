use std::io::{Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).unwrap();
    print!("args={} stdin={}", args.join(","), input);
    std::io::stdout().flush().unwrap();
    std::process::exit(args.len() as i32);
}
