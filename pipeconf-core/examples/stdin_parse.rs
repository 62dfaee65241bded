use std::io::Read;

use pipeconf_core::{Parser, YamlEvents};

fn main() {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).unwrap();

    for event in YamlEvents::new(&input) {
        eprintln!("EVENT: {:?}", event);
    }

    match Parser::new().parse_yaml(&input) {
        Ok(records) => {
            for record in records {
                println!("{:#?}", record);
            }
        }
        Err(err) => eprintln!("error: {}", err),
    }
}
