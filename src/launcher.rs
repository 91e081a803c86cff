use std::{
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
};

use crate::{
    append_automation_log, append_startup_log, append_window_log, error_report, icon_path,
    launch_plan, Automation, AutomationError, AutomationOptions, HostError, HostMode, LaunchConfig,
    LaunchError, ProcessSpawner, WindowHandle, WindowRegistry, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH, INCONSISTENT_ACTIVATE_MESSAGE, MAIN_WINDOW_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherState {
    Uninitialized,
    ReexecPending,
    Terminated,
    HostedWaiting,
    Electrifying,
    Running,
    ErrorShown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Standalone and not asked to relaunch; nothing else happens.
    Idle,
    /// The host process was spawned; this process is done.
    Relaunched { pid: u32 },
    /// Running inside the host; wait for the ready event.
    Hosted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRequest {
    pub label: String,
    pub title: String,
    pub url: String,
    pub width: f64,
    pub height: f64,
    pub icon: Option<PathBuf>,
    pub visible: bool,
}

/// The GUI host seen from the launcher.
pub trait WindowHost {
    fn create_window(&mut self, request: &WindowRequest) -> Result<WindowHandle, HostError>;
    fn window_exists(&self, label: &str) -> bool;
    /// Unminimizes, shows and focuses an existing window.
    fn reveal_window(&mut self, label: &str) -> Result<(), HostError>;
    fn exit(&mut self, code: i32);
}

#[derive(Debug)]
pub struct Launcher {
    config: LaunchConfig,
    state: LauncherState,
    windows: WindowRegistry,
    next_window_id: u64,
    keep_alive_without_windows: bool,
}

impl Launcher {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            config,
            state: LauncherState::Uninitialized,
            windows: WindowRegistry::default(),
            next_window_id: 0,
            keep_alive_without_windows: cfg!(target_os = "macos"),
        }
    }

    /// Overrides the platform convention for "all windows closed".
    pub fn keep_alive_without_windows(mut self, keep_alive: bool) -> Self {
        self.keep_alive_without_windows = keep_alive;
        self
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn state(&self) -> LauncherState {
        self.state
    }

    pub fn main_window(&self) -> Option<&WindowHandle> {
        self.windows.main()
    }

    pub fn bootstrap<S>(
        &mut self,
        mode: HostMode,
        spawner: &mut S,
        host_bin: impl FnOnce() -> Result<PathBuf, LaunchError>,
        cwd: &Path,
    ) -> Result<BootstrapOutcome, LaunchError>
    where
        S: ProcessSpawner + ?Sized,
    {
        if self.state != LauncherState::Uninitialized {
            append_startup_log(&format!("bootstrap ignored in state {:?}", self.state));
            return Ok(BootstrapOutcome::Idle);
        }

        match mode {
            HostMode::Hosted => {
                self.state = LauncherState::HostedWaiting;
                append_startup_log("running inside desktop host, waiting for ready");
                Ok(BootstrapOutcome::Hosted)
            }
            HostMode::Standalone if !self.config.auto_run_host => {
                self.state = LauncherState::Terminated;
                append_startup_log("standalone run without --runElectron, nothing to launch");
                Ok(BootstrapOutcome::Idle)
            }
            HostMode::Standalone => {
                self.state = LauncherState::ReexecPending;
                let result = host_bin().and_then(|bin| {
                    let plan = launch_plan::build_reexec_plan(&self.config, bin, cwd);
                    append_startup_log(&format!(
                        "relaunching inside desktop host: {:?}",
                        launch_plan::build_debug_command(&plan)
                    ));
                    spawner.spawn(&plan)
                });
                self.state = LauncherState::Terminated;
                let pid = result?;
                append_startup_log(&format!("desktop host started with pid {pid}"));
                Ok(BootstrapOutcome::Relaunched { pid })
            }
        }
    }

    /// Host is ready. Returns the automation options the first time only.
    pub fn handle_ready(&mut self) -> Option<AutomationOptions> {
        if self.state != LauncherState::HostedWaiting {
            append_startup_log(&format!("ready event ignored in state {:?}", self.state));
            return None;
        }
        self.state = LauncherState::Electrifying;
        append_automation_log("host ready, starting automation");
        Some(AutomationOptions::for_app_root(self.config.app_root.clone()))
    }

    pub fn handle_automation_result<H>(
        &mut self,
        host: &mut H,
        result: Result<(), AutomationError>,
    ) -> Result<WindowHandle, HostError>
    where
        H: WindowHost + ?Sized,
    {
        match result {
            Ok(()) => {
                append_automation_log("automation finished, opening main window");
                self.state = LauncherState::Running;
                match self.create_window(host, None, None) {
                    Ok(handle) => Ok(handle),
                    Err(error) => {
                        append_window_log(&format!("main window failed, showing report: {error}"));
                        self.state = LauncherState::ErrorShown;
                        self.show_error_window(host, &error).map_err(|_| error)
                    }
                }
            }
            Err(error) => {
                append_automation_log(&format!("automation failed: {error}"));
                self.state = LauncherState::ErrorShown;
                self.show_error_window(host, &error)
            }
        }
    }

    /// Ready, automation and window creation in one blocking call.
    pub fn electrify<H, A>(
        &mut self,
        host: &mut H,
        automation: &A,
    ) -> Option<Result<WindowHandle, HostError>>
    where
        H: WindowHost + ?Sized,
        A: Automation + ?Sized,
    {
        let options = self.handle_ready()?;
        let result = run_automation_guarded(automation, &options);
        Some(self.handle_automation_result(host, result))
    }

    pub fn create_window<H>(
        &mut self,
        host: &mut H,
        title: Option<&str>,
        html: Option<&str>,
    ) -> Result<WindowHandle, HostError>
    where
        H: WindowHost + ?Sized,
    {
        self.next_window_id += 1;
        let url = match html {
            Some(content) => error_report::html_data_url(content),
            None => self.config.server_url(),
        };
        let request = WindowRequest {
            label: format!("{MAIN_WINDOW_KEY}-{}", self.next_window_id),
            title: title.unwrap_or(DEFAULT_WINDOW_TITLE).to_string(),
            url,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            icon: icon_path::resolve_default_icon_path(&self.config.webform_dir()),
            visible: true,
        };

        let handle = host.create_window(&request)?;
        if let Some(previous) = self.windows.replace_main(handle.clone()) {
            append_window_log(&format!("main window replaced; {} stays open", previous.label));
        }
        append_window_log(&format!("created window {} ({})", handle.label, request.title));
        Ok(handle)
    }

    pub fn show_error_window<H, E>(
        &mut self,
        host: &mut H,
        error: &E,
    ) -> Result<WindowHandle, HostError>
    where
        H: WindowHost + ?Sized,
        E: std::fmt::Display + serde::Serialize + ?Sized,
    {
        let html = error_report::render_error_report(&self.config.app_root, error);
        self.create_window(host, Some(error_report::ERROR_REPORT_TITLE), Some(&html))
    }

    pub fn handle_window_closed(&mut self, label: &str) {
        if self.windows.clear_if_main(label) {
            append_window_log(&format!("main window {label} closed"));
        }
    }

    /// Returns true when the process is asked to exit.
    pub fn handle_all_windows_closed<H>(&mut self, host: &mut H) -> bool
    where
        H: WindowHost + ?Sized,
    {
        if self.keep_alive_without_windows {
            append_window_log("all windows closed, staying alive");
            return false;
        }
        append_window_log("all windows closed, exiting");
        self.state = LauncherState::Terminated;
        host.exit(0);
        true
    }

    /// Dock-icon style reactivation. Returns the window created, if any.
    pub fn handle_activate<H>(
        &mut self,
        host: &mut H,
        has_visible_windows: bool,
    ) -> Result<Option<WindowHandle>, HostError>
    where
        H: WindowHost + ?Sized,
    {
        if !matches!(self.state, LauncherState::Running | LauncherState::ErrorShown) {
            append_window_log(&format!("activate ignored in state {:?}", self.state));
            return Ok(None);
        }

        let tracked = self.windows.main().map(|handle| handle.label.clone());
        match (tracked, has_visible_windows) {
            (None, _) => {
                self.state = LauncherState::Running;
                self.create_window(host, None, None).map(Some)
            }
            (Some(label), false) if host.window_exists(&label) => {
                append_window_log(&format!("activate revealing hidden window {label}"));
                host.reveal_window(&label)?;
                Ok(None)
            }
            (Some(_), false) => {
                let html = error_report::render_message_report(
                    &self.config.app_root,
                    INCONSISTENT_ACTIVATE_MESSAGE,
                );
                self.state = LauncherState::ErrorShown;
                self.create_window(host, Some(error_report::ERROR_REPORT_TITLE), Some(&html))
                    .map(Some)
            }
            (Some(_), true) => Ok(None),
        }
    }
}

/// Runs the automation, turning a panic into an [`AutomationError`].
pub fn run_automation_guarded<A>(
    automation: &A,
    options: &AutomationOptions,
) -> Result<(), AutomationError>
where
    A: Automation + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| automation.run(options))).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "automation panicked".to_string());
        Err(AutomationError::Failed { reason })
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Mutex};

    use super::*;
    use crate::{error_report::ERROR_REPORT_TITLE, launch_plan::LaunchPlan, CliArgs};

    #[derive(Default)]
    struct FakeHost {
        windows: Vec<WindowRequest>,
        destroyed: Vec<String>,
        revealed: Vec<String>,
        exit_codes: Vec<i32>,
        fail_create: bool,
        refuse_content: bool,
    }

    impl WindowHost for FakeHost {
        fn create_window(&mut self, request: &WindowRequest) -> Result<WindowHandle, HostError> {
            if self.fail_create || (self.refuse_content && request.url.starts_with("http")) {
                return Err(HostError("window creation refused".to_string()));
            }
            self.windows.push(request.clone());
            Ok(WindowHandle::new(request.label.clone()))
        }

        fn window_exists(&self, label: &str) -> bool {
            self.windows.iter().any(|window| window.label == label)
                && !self.destroyed.iter().any(|destroyed| destroyed == label)
        }

        fn reveal_window(&mut self, label: &str) -> Result<(), HostError> {
            self.revealed.push(label.to_string());
            Ok(())
        }

        fn exit(&mut self, code: i32) {
            self.exit_codes.push(code);
        }
    }

    #[derive(Default)]
    struct RecordingSpawner {
        plans: Vec<LaunchPlan>,
    }

    impl ProcessSpawner for RecordingSpawner {
        fn spawn(&mut self, plan: &LaunchPlan) -> Result<u32, LaunchError> {
            self.plans.push(plan.clone());
            Ok(4242)
        }
    }

    struct FixedAutomation {
        result: Result<(), AutomationError>,
        calls: Mutex<Vec<AutomationOptions>>,
    }

    impl FixedAutomation {
        fn new(result: Result<(), AutomationError>) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl Automation for FixedAutomation {
        fn run(&self, options: &AutomationOptions) -> Result<(), AutomationError> {
            self.calls.lock().expect("calls lock").push(options.clone());
            self.result.clone()
        }
    }

    struct PanickingAutomation;

    impl Automation for PanickingAutomation {
        fn run(&self, _options: &AutomationOptions) -> Result<(), AutomationError> {
            panic!("watch tool crashed");
        }
    }

    fn config(args: &[&str], root: &Path) -> LaunchConfig {
        use clap::Parser;
        let cli =
            CliArgs::try_parse_from(std::iter::once("webform-shell").chain(args.iter().copied()))
                .expect("parse cli args");
        LaunchConfig::resolve(&cli, root, |_| None)
    }

    fn hosted_launcher(root: &Path) -> Launcher {
        let mut launcher = Launcher::new(config(&[], root)).keep_alive_without_windows(false);
        let outcome = launcher
            .bootstrap(
                HostMode::Hosted,
                &mut RecordingSpawner::default(),
                || Ok(PathBuf::from("host")),
                root,
            )
            .expect("bootstrap hosted");
        assert_eq!(outcome, BootstrapOutcome::Hosted);
        launcher
    }

    fn decode_data_url(url: &str) -> String {
        let encoded = url
            .strip_prefix("data:text/html;charset=utf-8,")
            .expect("data url prefix");
        percent_encoding::percent_decode_str(encoded)
            .decode_utf8()
            .expect("utf8 html")
            .to_string()
    }

    #[test]
    fn standalone_without_run_flag_spawns_nothing() {
        let mut launcher = Launcher::new(config(&["--log=debug"], Path::new("/work")));
        let mut spawner = RecordingSpawner::default();

        let outcome = launcher
            .bootstrap(
                HostMode::Standalone,
                &mut spawner,
                || Ok(PathBuf::from("host")),
                Path::new("/work"),
            )
            .expect("bootstrap");

        assert_eq!(outcome, BootstrapOutcome::Idle);
        assert!(spawner.plans.is_empty());
        assert_eq!(launcher.state(), LauncherState::Terminated);
        assert!(launcher.main_window().is_none());
    }

    #[test]
    fn standalone_with_run_flag_spawns_host_once_with_default_port() {
        let mut launcher = Launcher::new(config(&["--runElectron"], Path::new("/work")));
        let mut spawner = RecordingSpawner::default();

        let outcome = launcher
            .bootstrap(
                HostMode::Standalone,
                &mut spawner,
                || Ok(PathBuf::from("host")),
                Path::new("/work"),
            )
            .expect("bootstrap");

        assert_eq!(outcome, BootstrapOutcome::Relaunched { pid: 4242 });
        assert_eq!(spawner.plans.len(), 1);
        assert_eq!(spawner.plans[0].args, vec![".", "--port=3000"]);
        assert_eq!(launcher.state(), LauncherState::Terminated);
    }

    #[test]
    fn relaunch_forwards_log_level() {
        let mut launcher = Launcher::new(config(
            &["--runElectron", "--log=debug"],
            Path::new("/work"),
        ));
        let mut spawner = RecordingSpawner::default();

        launcher
            .bootstrap(
                HostMode::Standalone,
                &mut spawner,
                || Ok(PathBuf::from("host")),
                Path::new("/work"),
            )
            .expect("bootstrap");

        assert_eq!(
            spawner.plans[0].args,
            vec![".", "--port=3000", "--log=debug"]
        );
    }

    #[test]
    fn relaunch_reports_unresolvable_host_binary() {
        let mut launcher = Launcher::new(config(&["--runElectron"], Path::new("/work")));
        let mut spawner = RecordingSpawner::default();

        let result = launcher.bootstrap(
            HostMode::Standalone,
            &mut spawner,
            || Err(LaunchError::HostBinaryUnavailable("gone".to_string())),
            Path::new("/work"),
        );

        assert!(matches!(result, Err(LaunchError::HostBinaryUnavailable(_))));
        assert!(spawner.plans.is_empty());
        assert_eq!(launcher.state(), LauncherState::Terminated);
    }

    #[test]
    fn successful_automation_opens_one_content_window() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        let automation = FixedAutomation::new(Ok(()));

        let handle = launcher
            .electrify(&mut host, &automation)
            .expect("ready accepted")
            .expect("window created");

        assert_eq!(host.windows.len(), 1);
        assert_eq!(host.windows[0].url, "http://localhost:3000/");
        assert_eq!(host.windows[0].title, DEFAULT_WINDOW_TITLE);
        assert_eq!(host.windows[0].width, 1200.0);
        assert_eq!(host.windows[0].height, 800.0);
        assert!(host.windows[0].visible);
        assert_eq!(launcher.main_window(), Some(&handle));
        assert_eq!(launcher.state(), LauncherState::Running);

        let calls = automation.calls.lock().expect("calls lock");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], AutomationOptions::for_app_root(temp.path().to_path_buf()));
    }

    #[test]
    fn failed_automation_opens_one_diagnostic_window() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        let automation = FixedAutomation::new(Err(AutomationError::Failed {
            reason: "tsc reported 3 errors".to_string(),
        }));

        launcher
            .electrify(&mut host, &automation)
            .expect("ready accepted")
            .expect("window created");

        assert_eq!(host.windows.len(), 1);
        assert_eq!(host.windows[0].title, ERROR_REPORT_TITLE);
        let html = decode_data_url(&host.windows[0].url);
        assert!(html.contains(&temp.path().display().to_string()));
        assert!(html.contains("tsc reported 3 errors"));
        assert_eq!(launcher.state(), LauncherState::ErrorShown);
    }

    #[test]
    fn panicking_automation_is_reported_like_a_failure() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();

        launcher
            .electrify(&mut host, &PanickingAutomation)
            .expect("ready accepted")
            .expect("window created");

        assert_eq!(host.windows.len(), 1);
        assert!(decode_data_url(&host.windows[0].url).contains("watch tool crashed"));
        assert_eq!(launcher.state(), LauncherState::ErrorShown);
    }

    #[test]
    fn ready_is_only_accepted_once() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());

        assert!(launcher.handle_ready().is_some());
        assert!(launcher.handle_ready().is_none());
        assert_eq!(launcher.state(), LauncherState::Electrifying);
    }

    #[test]
    fn ready_is_ignored_outside_the_host() {
        let mut launcher = Launcher::new(config(&[], Path::new("/work")));
        assert!(launcher.handle_ready().is_none());
        assert_eq!(launcher.state(), LauncherState::Uninitialized);
    }

    #[test]
    fn window_uses_icon_from_webform_dir() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let webform_dir = temp.path().join("app").join("webform");
        fs::create_dir_all(&webform_dir).expect("create webform dir");
        fs::write(webform_dir.join("icon.png"), b"png").expect("write icon");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();

        launcher
            .create_window(&mut host, None, None)
            .expect("window created");

        assert_eq!(host.windows[0].icon, Some(webform_dir.join("icon.png")));
    }

    #[test]
    fn create_window_replaces_tracked_handle_without_closing_previous() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();

        let first = launcher
            .create_window(&mut host, None, None)
            .expect("first window");
        let second = launcher
            .create_window(&mut host, Some("Other"), Some("<p>hi</p>"))
            .expect("second window");

        assert_ne!(first, second);
        assert_eq!(host.windows.len(), 2);
        assert_eq!(host.windows[1].title, "Other");
        assert!(host.windows[1].url.starts_with("data:text/html"));
        assert_eq!(launcher.main_window(), Some(&second));
    }

    #[test]
    fn closing_main_window_clears_registry() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        let handle = launcher
            .create_window(&mut host, None, None)
            .expect("window created");

        launcher.handle_window_closed(&handle.label);
        assert!(launcher.main_window().is_none());
    }

    #[test]
    fn all_windows_closed_exits_unless_platform_keeps_alive() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut host = FakeHost::default();

        let mut exiting = hosted_launcher(temp.path());
        assert!(exiting.handle_all_windows_closed(&mut host));
        assert_eq!(host.exit_codes, vec![0]);

        let mut staying = hosted_launcher(temp.path()).keep_alive_without_windows(true);
        assert!(!staying.handle_all_windows_closed(&mut host));
        assert_eq!(host.exit_codes, vec![0]);
    }

    #[test]
    fn activate_without_window_creates_default_window() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        let handle = launcher
            .electrify(&mut host, &FixedAutomation::new(Ok(())))
            .expect("ready accepted")
            .expect("window created");
        launcher.handle_window_closed(&handle.label);

        let created = launcher
            .handle_activate(&mut host, false)
            .expect("activate");

        assert!(created.is_some());
        assert_eq!(host.windows.len(), 2);
        assert_eq!(host.windows[1].url, "http://localhost:3000/");
    }

    #[test]
    fn activate_after_error_recreates_content_window() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        let handle = launcher
            .electrify(
                &mut host,
                &FixedAutomation::new(Err(AutomationError::Failed {
                    reason: "boom".to_string(),
                })),
            )
            .expect("ready accepted")
            .expect("window created");
        launcher.handle_window_closed(&handle.label);

        launcher
            .handle_activate(&mut host, false)
            .expect("activate");

        assert_eq!(launcher.state(), LauncherState::Running);
        assert_eq!(host.windows[1].url, "http://localhost:3000/");
    }

    #[test]
    fn activate_with_stale_handle_shows_inconsistency_report() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        let handle = launcher
            .electrify(&mut host, &FixedAutomation::new(Ok(())))
            .expect("ready accepted")
            .expect("window created");
        host.destroyed.push(handle.label);

        launcher
            .handle_activate(&mut host, false)
            .expect("activate");

        assert_eq!(host.windows.len(), 2);
        assert!(decode_data_url(&host.windows[1].url).contains(INCONSISTENT_ACTIVATE_MESSAGE));
        assert_eq!(launcher.state(), LauncherState::ErrorShown);
    }

    #[test]
    fn activate_reveals_minimized_tracked_window() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        let handle = launcher
            .electrify(&mut host, &FixedAutomation::new(Ok(())))
            .expect("ready accepted")
            .expect("window created");

        let created = launcher.handle_activate(&mut host, false).expect("activate");

        assert!(created.is_none());
        assert_eq!(host.windows.len(), 1);
        assert_eq!(host.revealed, vec![handle.label.clone()]);
        assert_eq!(launcher.main_window(), Some(&handle));
        assert_eq!(launcher.state(), LauncherState::Running);
    }

    #[test]
    fn activate_with_visible_tracked_window_does_nothing() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        launcher
            .electrify(&mut host, &FixedAutomation::new(Ok(())))
            .expect("ready accepted")
            .expect("window created");

        let created = launcher.handle_activate(&mut host, true).expect("activate");

        assert!(created.is_none());
        assert_eq!(host.windows.len(), 1);
    }

    #[test]
    fn activate_is_ignored_while_automation_runs() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        launcher.handle_ready();

        let created = launcher.handle_activate(&mut host, false).expect("activate");

        assert!(created.is_none());
        assert!(host.windows.is_empty());
    }

    #[test]
    fn refused_content_window_falls_back_to_diagnostic_window() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost {
            refuse_content: true,
            ..FakeHost::default()
        };

        let handle = launcher
            .electrify(&mut host, &FixedAutomation::new(Ok(())))
            .expect("ready accepted")
            .expect("diagnostic window created");

        assert_eq!(host.windows.len(), 1);
        assert_eq!(host.windows[0].title, ERROR_REPORT_TITLE);
        let html = decode_data_url(&host.windows[0].url);
        assert!(html.contains("window creation refused"));
        assert!(html.contains(&temp.path().display().to_string()));
        assert_eq!(launcher.main_window(), Some(&handle));
        assert_eq!(launcher.state(), LauncherState::ErrorShown);
    }

    #[test]
    fn host_window_failure_is_returned_when_diagnostic_also_fails() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut launcher = hosted_launcher(temp.path());
        let mut host = FakeHost {
            fail_create: true,
            ..FakeHost::default()
        };

        let result = launcher
            .electrify(&mut host, &FixedAutomation::new(Ok(())))
            .expect("ready accepted");

        assert!(matches!(
            result,
            Err(HostError(message)) if message == "window creation refused"
        ));
        assert!(launcher.main_window().is_none());
        assert_eq!(launcher.state(), LauncherState::ErrorShown);
    }

    #[test]
    fn default_port_flows_into_spawn_and_url() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut parent = Launcher::new(config(&["--runElectron"], temp.path()));
        let mut spawner = RecordingSpawner::default();
        parent
            .bootstrap(
                HostMode::Standalone,
                &mut spawner,
                || Ok(PathBuf::from("host")),
                temp.path(),
            )
            .expect("bootstrap parent");

        let mut child = hosted_launcher(temp.path());
        let mut host = FakeHost::default();
        child
            .electrify(&mut host, &FixedAutomation::new(Ok(())))
            .expect("ready accepted")
            .expect("window created");

        assert!(spawner.plans[0].args.contains(&"--port=3000".to_string()));
        assert_eq!(host.windows[0].url, "http://localhost:3000/");
    }
}
