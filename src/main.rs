use mongors::run;

#[tokio::main]
async fn main() {
    let result = run().await;
    let error = match result {
        Err(error) => error,
        Ok(0) => return,
        Ok(num) => std::process::exit(num),
    };

    // Provide better error messages for cases where we can provide suggestions to the user.
    if let Some(error) = error.downcast_ref::<mongors::InvalidReplicaSet>() {
        eprintln!("{}", error);
        eprintln!("Replica set is invalid! Try --reconfig option!");
        std::process::exit(1);
    }

    // Print the error in detailed format for all other cases.
    eprintln!("{:?}", error);
    std::process::exit(1);
}
