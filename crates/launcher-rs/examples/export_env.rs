//! Export-only mode example: print the environment a bootstrap process
//! would receive, without resolving or launching anything.

use std::collections::BTreeMap;
use std::path::PathBuf;

use launcher_rs::{TaskLauncher, TaskLaunchSpec};

fn main() {
    let mut params = BTreeMap::new();
    params.insert("env.JAVA_OPTS".to_string(), "-Xmx512m".to_string());
    params.insert("cpus".to_string(), "2".to_string());

    let spec = TaskLaunchSpec {
        framework_id: "fw-demo".to_string(),
        executor_ref: "hdfs://store/bundles/demo.tgz".to_string(),
        user: "nobody".to_string(),
        work_directory: PathBuf::from("/tmp/launcher-demo"),
        slave_pid: "slave@127.0.0.1:5051".to_string(),
        mesos_home: Some("/opt/mesos".to_string()),
        hadoop_home: None,
        redirect_io: true,
        should_switch_user: false,
        params,
    };

    let launcher = TaskLauncher::new(spec);

    println!("=== Launcher - Export-Only Example ===\n");
    for (name, value) in launcher.bootstrap_environment().iter() {
        println!("{}={}", name, value);
    }
}
