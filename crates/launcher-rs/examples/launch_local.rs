//! Launch a local executable: the process running this example is replaced
//! by `/bin/echo`, so nothing after `launch()` runs on success.

use std::collections::BTreeMap;
use std::path::PathBuf;

use launcher_rs::{TaskLauncher, TaskLaunchSpec};

fn main() {
    let spec = TaskLaunchSpec {
        framework_id: "fw-demo".to_string(),
        executor_ref: "/bin/echo".to_string(),
        user: String::new(),
        work_directory: std::env::temp_dir().join("launcher-demo"),
        slave_pid: "slave@127.0.0.1:5051".to_string(),
        mesos_home: None,
        hadoop_home: None,
        redirect_io: false,
        should_switch_user: false,
        params: BTreeMap::new(),
    };

    println!("=== Launcher - Local Launch Example ===");
    println!("[*] replacing this process with /bin/echo\n");

    let error = TaskLauncher::new(spec).launch();

    // Only reachable when the launch failed
    eprintln!("launch failed: {}", error);
    std::process::exit(1);
}
