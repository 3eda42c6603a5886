
use predicates::prelude::*;
use predicates::str::contains;

use crate::setup::{Inputs, make_cli};

#[test]
fn test_prompt_join() {
    let inputs = Inputs::new();
    let input = format!(
        "join {} {} id left\n",
        inputs.left.display(),
        inputs.right.display()
    );

    make_cli()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            contains("Enter the joining command below:")
                .and(contains("Joining result was saved in path:")),
        );

    assert!(inputs.output().exists());
}

#[test]
fn test_prompt_reprompts() {
    let inputs = Inputs::new();
    let input = format!(
        "select 1\njoin {l} {r} id outer\njoin {l} {r} id inner\n",
        l = inputs.left.display(),
        r = inputs.right.display()
    );

    make_cli()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            contains("Wrong joining command, try again!")
                .and(contains("ERROR: invalid join type 'outer'"))
                .and(contains("Joining result was saved in path:")),
        );

    assert!(inputs.output().exists());
}

#[test]
fn test_prompt_eof() {
    make_cli()
        .write_stdin("")
        .assert()
        .success()
        .stdout("Enter the joining command below:\n");
}
