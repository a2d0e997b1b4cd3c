//! Binding a future to a toast
//!
//! A bound future drives one toast through `loading -> terminal`. The
//! binder runs on its own tokio task; everything it does to the registry goes
//! through the regular [`Toaster`] calls, so other producers may interleave
//! with it at every await point (the bound id can be dismissed or rewritten
//! underneath it).

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::{Branch, Error, PromiseError, Result};
use crate::toast::{Content, ToastId, ToastInput, ToastKind};
use crate::toaster::Toaster;

use super::classify::{Classification, Classifier};
use super::options::{
    DescriptionField, ErrorField, Failure, MessageFuture, PromiseMessage, PromiseOptions, Settled,
    SuccessField,
};

/// Handle to a bound future
///
/// Dropping the handle does not cancel anything; the toast still advances
/// when the future settles.
pub struct PromiseHandle<T, E> {
    id: Option<ToastId>,
    outcome: oneshot::Receiver<std::result::Result<T, E>>,
    task: JoinHandle<()>,
}

impl<T, E> PromiseHandle<T, E> {
    /// Id of the bound toast, if a loading record was shown
    pub fn id(&self) -> Option<&ToastId> {
        self.id.as_ref()
    }

    /// Whether the binder finished its work (terminal record and hook)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the future's own outcome, independent of what was shown
    pub async fn unwrap(self) -> std::result::Result<T, PromiseError<E>> {
        match self.outcome.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(reason)) => Err(PromiseError::Rejected(reason)),
            Err(_) => Err(PromiseError::Interrupted),
        }
    }
}

impl<T, E> std::fmt::Debug for PromiseHandle<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromiseHandle")
            .field("id", &self.id)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

impl Toaster {
    /// Bind a future to a toast
    ///
    /// Shows the loading record right away when `loading` is configured, then
    /// spawns a task that writes the terminal record once the future settles.
    /// Returns `Ok(None)` without touching anything when `options` is `None`.
    ///
    /// # Errors
    ///
    /// [`Error::NoRuntime`] when called outside a tokio runtime. Nothing is
    /// created in that case.
    pub fn promise<T, E, Fut>(
        &self,
        future: Fut,
        options: Option<PromiseOptions<T, E>>,
    ) -> Result<Option<PromiseHandle<T, E>>>
    where
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let Some(options) = options else {
            tracing::debug!("Promise bound without options, ignoring");
            return Ok(None);
        };
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let PromiseOptions {
            toast,
            loading,
            success,
            error,
            description,
            classify,
            finally,
        } = options;
        let channel = toast.channel.clone();

        let (id, loading_shown) = match loading {
            Some(content) => {
                let mut input = toast.kind(ToastKind::Loading).title(content).bound(true);
                if let Some(PromiseMessage::Content(c)) =
                    description.as_ref().and_then(|d| d.as_literal())
                {
                    input = input.description(c.clone());
                }
                (Some(self.create(input)), true)
            }
            None => (toast.id.filter(ToastId::is_usable), false),
        };

        tracing::debug!(
            toast = ?id,
            channel = ?channel,
            loading = loading_shown,
            "Promise bound"
        );

        let binder = Binder {
            toaster: self.clone(),
            id: id.clone(),
            channel,
            loading_shown,
            success,
            error,
            description,
            classify,
        };

        let (tx, rx) = oneshot::channel();
        let task = runtime.spawn(drive(binder, future, finally, tx));

        Ok(Some(PromiseHandle {
            id,
            outcome: rx,
            task,
        }))
    }

    /// Bind the future returned by `producer`
    ///
    /// `producer` is not called when `options` is `None` or no runtime is
    /// available.
    pub fn promise_with<T, E, P, Fut>(
        &self,
        producer: P,
        options: Option<PromiseOptions<T, E>>,
    ) -> Result<Option<PromiseHandle<T, E>>>
    where
        P: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        if options.is_none() {
            return Ok(None);
        }
        Handle::try_current().map_err(|_| Error::NoRuntime)?;

        self.promise(producer(), options)
    }
}

/// What to write once the future settled
enum Plan {
    /// Leave the loading record alone; it is dismissed afterwards
    Nothing,
    /// Show the resolved value itself
    Show(Content),
    /// Compute and show a terminal record
    Compute {
        kind: ToastKind,
        branch: Branch,
        content: MessageFuture,
        description: Option<MessageFuture>,
    },
}

struct Binder<T, E> {
    toaster: Toaster,
    id: Option<ToastId>,
    channel: Option<String>,
    loading_shown: bool,
    success: Option<SuccessField<T>>,
    error: Option<ErrorField<E>>,
    description: Option<DescriptionField<T, E>>,
    classify: Option<Classifier<T>>,
}

impl<T, E> Binder<T, E> {
    fn resolved(&self, value: &T) -> Plan {
        let class = self
            .classify
            .as_ref()
            .map_or(Classification::Plain, |classify| classify(value));

        match class {
            Classification::Content(content) => Plan::Show(content),
            Classification::Failure { status } => self.failed(Failure::Status { status }),
            Classification::Error { message } => self.failed(Failure::Errored { message: &message }),
            Classification::Plain => match &self.success {
                Some(field) => Plan::Compute {
                    kind: ToastKind::Success,
                    branch: Branch::Success,
                    content: field.evaluate(value),
                    description: self.describe(Settled::Resolved(value)),
                },
                None => Plan::Nothing,
            },
        }
    }

    fn rejected(&self, reason: &E) -> Plan {
        self.failed(Failure::Rejected(reason))
    }

    fn failed(&self, failure: Failure<'_, E>) -> Plan {
        let content = match (&self.error, failure.shape_text()) {
            (Some(field), _) => field.evaluate(failure),
            // Shape-detected failures always surface, even without error content
            (None, Some(text)) => Box::pin(std::future::ready(Ok(PromiseMessage::from(text)))),
            (None, None) => return Plan::Nothing,
        };

        Plan::Compute {
            kind: ToastKind::Error,
            branch: Branch::Error,
            content,
            description: self.describe(Settled::Failed(failure)),
        }
    }

    fn describe(&self, outcome: Settled<'_, T, E>) -> Option<MessageFuture> {
        self.description.as_ref().map(|field| field.evaluate(outcome))
    }

    /// Write the terminal record; false when there is none
    async fn finish(&self, plan: Plan) -> bool {
        let (kind, branch, content, description) = match plan {
            Plan::Nothing => return false,
            Plan::Show(content) => {
                self.write(ToastInput::new().kind(ToastKind::Default).title(content));
                return true;
            }
            Plan::Compute {
                kind,
                branch,
                content,
                description,
            } => (kind, branch, content, description),
        };

        // Content first, then description, each awaited in turn
        let content = content.await;
        let description = match description {
            Some(description) => Some(description.await),
            None => None,
        };

        let mut input = ToastInput::new().kind(kind);

        match description {
            Some(Ok(PromiseMessage::Content(c))) => input = input.description(c),
            Some(Ok(PromiseMessage::Extended(extended))) => input = input.overlay(extended),
            Some(Err(e)) => {
                let error = Error::content(Branch::Description, &e);
                tracing::warn!(toast = ?self.id, error = %error, "Dropping description");
            }
            None => {}
        }

        match content {
            Ok(PromiseMessage::Content(c)) => input = input.title(c),
            Ok(PromiseMessage::Extended(extended)) => input = input.overlay(extended),
            Err(e) => {
                let error = Error::content(branch, &e);
                tracing::warn!(toast = ?self.id, error = %error, "Showing content failure");
                input = input.kind(ToastKind::Error).title(error.to_string());
            }
        }

        self.write(input);
        true
    }

    fn write(&self, mut input: ToastInput) {
        input.id = self.id.clone();
        if input.channel.is_none() {
            input.channel = self.channel.clone();
        }
        let id = self.toaster.create(input.bound(false));

        tracing::debug!(toast = %id, "Promise toast settled");
    }

    /// Clear the binding; dismiss the loading record if nothing replaced it
    fn settle(&self, terminal: bool) {
        if !self.loading_shown {
            return;
        }
        let Some(id) = &self.id else {
            return;
        };

        self.toaster.registry().set_bound(id, false);
        if !terminal {
            tracing::debug!(toast = %id, "No terminal content, dismissing");
            self.toaster.dismiss(Some(id.clone()), None);
        }
    }
}

async fn drive<T, E, Fut>(
    binder: Binder<T, E>,
    future: Fut,
    finally: Option<Box<dyn FnOnce() + Send>>,
    tx: oneshot::Sender<std::result::Result<T, E>>,
) where
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let outcome = future.await;

    let plan = match &outcome {
        Ok(value) => binder.resolved(value),
        Err(reason) => binder.rejected(reason),
    };
    let terminal = binder.finish(plan).await;
    binder.settle(terminal);

    if let Some(finally) = finally {
        finally();
    }

    // Receiver gone means nobody asked for the outcome
    let _ = tx.send(outcome);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};
    use tokio_test::{assert_ok, assert_pending};

    use super::*;
    use crate::config::ToasterConfig;
    use crate::error::BoxError;
    use crate::router::{Subscription, ToastEvent};
    use crate::toast::{Toast, ToastDuration};

    fn immediate() -> Toaster {
        Toaster::with_config(ToasterConfig::default().immediate_dismissals())
    }

    fn record(toaster: &Toaster, channel: &str) -> (Arc<Mutex<Vec<ToastEvent>>>, Subscription) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let sub = toaster.subscribe(channel, move |e: &ToastEvent| {
            sink.lock().unwrap().push(e.clone());
        });
        (events, sub)
    }

    fn toast_of(event: &ToastEvent) -> &Toast {
        event.toast().expect("not a dismissal")
    }

    #[tokio::test]
    async fn test_failed_response_shows_error() {
        let toaster = immediate();
        let (events, _sub) = record(&toaster, "default");

        let options = PromiseOptions::<Value, String>::new()
            .loading("Loading")
            .error("Failed")
            .sniff_shapes();
        let handle = toaster
            .promise(
                async { Ok::<_, String>(json!({"ok": false, "status": 404})) },
                Some(options),
            )
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();

        let value = assert_ok!(handle.unwrap().await);
        assert_eq!(value["status"], 404);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], ToastEvent::Created(t) if t.kind == ToastKind::Loading));
        let terminal = toast_of(&events[1]);
        assert!(matches!(events[1], ToastEvent::Updated(_)));
        assert_eq!(terminal.kind, ToastKind::Error);
        assert_eq!(terminal.title, Some(Content::from("Failed")));
        assert!(toaster.registry().is_active(&id));
    }

    #[tokio::test]
    async fn test_failed_response_without_error_content() {
        let toaster = immediate();

        let options = PromiseOptions::<Value, String>::new()
            .loading("Loading")
            .sniff_shapes();
        let handle = toaster
            .promise(
                async { Ok::<_, String>(json!({"ok": false, "status": 500})) },
                Some(options),
            )
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, Some(Content::from("HTTP error! status: 500")));
    }

    #[tokio::test]
    async fn test_loading_only_is_dismissed() {
        let toaster = immediate();
        let (events, _sub) = record(&toaster, "default");

        let options = PromiseOptions::<u32, String>::new().loading("Working…");
        let handle = toaster
            .promise(async { Ok::<_, String>(7) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();

        assert_eq!(handle.unwrap().await.unwrap(), 7);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ToastEvent::Created(_)));
        assert_eq!(events[1], ToastEvent::Dismissed { id: id.clone() });

        assert!(toaster.active(None).is_empty());
        assert_eq!(toaster.history().len(), 1);
        assert!(!toaster.get(&id).unwrap().bound);
    }

    #[tokio::test]
    async fn test_success_content() {
        let toaster = immediate();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Uploading")
            .success(SuccessField::with(|n: &u32| format!("{} files uploaded", n)));
        let handle = toaster
            .promise(async { Ok::<_, String>(3) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.title, Some(Content::from("3 files uploaded")));
        assert!(toaster.registry().is_active(&id));
    }

    #[tokio::test]
    async fn test_extended_success_result() {
        let toaster = immediate();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Saving")
            .success(SuccessField::with(|n: &u32| {
                ToastInput::new()
                    .title(format!("Saved #{}", n))
                    .duration(ToastDuration::Infinite)
            }));
        let handle = toaster
            .promise(async { Ok::<_, String>(12) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.title, Some(Content::from("Saved #12")));
        assert_eq!(toast.duration, Some(ToastDuration::Infinite));
    }

    #[tokio::test]
    async fn test_rejection_with_error_content() {
        let toaster = immediate();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Sending")
            .error(ErrorField::with(|f: Failure<'_, String>| format!("Failed: {}", f)));
        let handle = toaster
            .promise(async { Err::<u32, _>("boom".to_string()) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();

        let err = handle.unwrap().await.unwrap_err();
        assert_eq!(err.into_rejection().as_deref(), Some("boom"));

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, Some(Content::from("Failed: boom")));
    }

    #[tokio::test]
    async fn test_rejection_without_error_content() {
        let toaster = immediate();
        let (events, _sub) = record(&toaster, "default");

        let options = PromiseOptions::<u32, String>::new()
            .loading("Sending")
            .success("Sent");
        let handle = toaster
            .promise(async { Err::<u32, _>("boom".to_string()) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();

        assert!(matches!(
            handle.unwrap().await,
            Err(PromiseError::Rejected(ref reason)) if reason == "boom"
        ));

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], ToastEvent::Dismissed { id: id.clone() });
        assert_eq!(toaster.get(&id).unwrap().kind, ToastKind::Loading);
    }

    #[tokio::test]
    async fn test_no_options_is_noop() {
        let toaster = immediate();

        let handle = toaster
            .promise(async { Ok::<u32, String>(1) }, None::<PromiseOptions<u32, String>>)
            .unwrap();

        assert!(handle.is_none());
        assert!(toaster.history().is_empty());
    }

    #[tokio::test]
    async fn test_promise_with_skips_producer_without_options() {
        let toaster = immediate();
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);

        let handle = toaster
            .promise_with(
                move || {
                    flag.store(true, Ordering::SeqCst);
                    async { Ok::<u32, String>(1) }
                },
                None,
            )
            .unwrap();

        assert!(handle.is_none());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_no_runtime() {
        let toaster = immediate();
        let options = PromiseOptions::<u32, String>::new().loading("Loading");

        let result = toaster.promise(async { Ok::<u32, String>(1) }, Some(options));

        assert!(matches!(result, Err(Error::NoRuntime)));
        assert!(toaster.history().is_empty());
    }

    #[tokio::test]
    async fn test_content_failure_becomes_error_toast() {
        let toaster = immediate();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Rendering")
            .success(SuccessField::computed(|_: &u32| async {
                Err::<String, BoxError>("render failed".into())
            }));
        let handle = toaster
            .promise(async { Ok::<_, String>(1) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(
            toast.title,
            Some(Content::from("failed to compute success content: render failed"))
        );
    }

    #[tokio::test]
    async fn test_content_failure_keeps_description() {
        let toaster = immediate();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Rendering")
            .success(SuccessField::computed(|_: &u32| async {
                Err::<String, BoxError>("render failed".into())
            }))
            .description(DescriptionField::with(|_: Settled<'_, u32, String>| {
                ToastInput::new()
                    .description("kept")
                    .duration(ToastDuration::Infinite)
            }));
        let handle = toaster
            .promise(async { Ok::<_, String>(1) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(
            toast.title,
            Some(Content::from("failed to compute success content: render failed"))
        );
        assert_eq!(toast.description, Some(Content::from("kept")));
        assert_eq!(toast.duration, Some(ToastDuration::Infinite));
    }

    #[tokio::test]
    async fn test_content_awaited_before_description() {
        let toaster = immediate();
        let order = Arc::new(Mutex::new(Vec::new()));
        let content_log = Arc::clone(&order);
        let description_log = Arc::clone(&order);

        let options = PromiseOptions::<u32, String>::new()
            .loading("Working")
            .success(SuccessField::computed(move |_: &u32| {
                let log = Arc::clone(&content_log);
                async move {
                    log.lock().unwrap().push("content");
                    Ok::<_, BoxError>("Done")
                }
            }))
            .description(DescriptionField::computed(
                move |_: Settled<'_, u32, String>| {
                    let log = Arc::clone(&description_log);
                    async move {
                        log.lock().unwrap().push("description");
                        Ok::<_, BoxError>("details")
                    }
                },
            ));
        let handle = toaster
            .promise(async { Ok::<_, String>(1) }, Some(options))
            .unwrap()
            .unwrap();
        handle.unwrap().await.unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["content", "description"]);
    }

    #[tokio::test]
    async fn test_error_shaped_value_shows_error() {
        let toaster = immediate();

        let options = PromiseOptions::<Value, String>::new()
            .loading("Parsing")
            .success("unused")
            .error(ErrorField::with(|f: Failure<'_, String>| match f {
                Failure::Errored { message } => format!("E: {}", message),
                other => format!("unexpected: {}", other),
            }))
            .description(DescriptionField::with(|s: Settled<'_, Value, String>| match s {
                Settled::Failed(Failure::Errored { message }) => format!("errored: {}", message),
                _ => "unexpected".to_string(),
            }))
            .sniff_shapes();
        let handle = toaster
            .promise(
                async { Ok::<_, String>(json!({"name": "TypeError", "message": "bad"})) },
                Some(options),
            )
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();

        let value = assert_ok!(handle.unwrap().await);
        assert_eq!(value["name"], "TypeError");

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, Some(Content::from("E: bad")));
        assert_eq!(toast.description, Some(Content::from("errored: bad")));
        assert!(toaster.registry().is_active(&id));
    }

    #[tokio::test]
    async fn test_description_sees_failed_status() {
        let toaster = immediate();

        let options = PromiseOptions::<Value, String>::new()
            .loading("Saving")
            .error("Failed")
            .description(DescriptionField::with(|s: Settled<'_, Value, String>| match s {
                Settled::Failed(Failure::Status { status }) => format!("status {}", status),
                _ => "unexpected".to_string(),
            }))
            .sniff_shapes();
        let handle = toaster
            .promise(
                async { Ok::<_, String>(json!({"ok": false, "status": 404})) },
                Some(options),
            )
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.title, Some(Content::from("Failed")));
        assert_eq!(toast.description, Some(Content::from("status 404")));
    }

    #[tokio::test]
    async fn test_classified_content_shown_as_default() {
        let toaster = immediate();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Fetching")
            .success("unused")
            .classify(|n: &u32| Classification::Content(Content::text(format!("got {}", n))));
        let handle = toaster
            .promise(async { Ok::<_, String>(3) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Default);
        assert_eq!(toast.title, Some(Content::from("got 3")));
    }

    #[tokio::test]
    async fn test_description_literal_and_computed() {
        let toaster = immediate();
        let (events, _sub) = record(&toaster, "default");

        let options = PromiseOptions::<u32, String>::new()
            .loading("Uploading")
            .success("Uploaded")
            .description("Please wait");
        let handle = toaster
            .promise(async { Ok::<_, String>(1) }, Some(options))
            .unwrap()
            .unwrap();
        handle.unwrap().await.unwrap();

        {
            let events = events.lock().unwrap();
            assert_eq!(
                toast_of(&events[0]).description,
                Some(Content::from("Please wait"))
            );
        }

        let options = PromiseOptions::<u32, String>::new()
            .loading("Uploading")
            .success("Uploaded")
            .description(DescriptionField::with(|s: Settled<'_, u32, String>| match s {
                Settled::Resolved(n) => format!("{} bytes", n),
                Settled::Failed(f) => f.to_string(),
            }));
        let handle = toaster
            .promise(async { Ok::<_, String>(512) }, Some(options))
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        handle.unwrap().await.unwrap();

        let toast = toaster.get(&id).unwrap();
        assert_eq!(toast.description, Some(Content::from("512 bytes")));
    }

    #[tokio::test]
    async fn test_finally_runs_after_terminal_record() {
        let toaster = immediate();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let probe = toaster.clone();

        let options = PromiseOptions::<u32, String>::new()
            .id("job")
            .loading("Working")
            .success("Done")
            .finally(move || {
                let toast = probe.get(&ToastId::from("job"));
                assert_eq!(toast.map(|t| t.kind), Some(ToastKind::Success));
                flag.store(true, Ordering::SeqCst);
            });
        let handle = toaster
            .promise(async { Ok::<_, String>(1) }, Some(options))
            .unwrap()
            .unwrap();
        handle.unwrap().await.unwrap();

        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_bound_flag_while_pending() {
        let toaster = immediate();
        let (go, wait) = oneshot::channel::<()>();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Waiting")
            .success("Done");
        let handle = toaster
            .promise(
                async move {
                    let _ = wait.await;
                    Ok::<_, String>(1)
                },
                Some(options),
            )
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();
        assert!(toaster.get(&id).unwrap().bound);

        let mut outcome = tokio_test::task::spawn(handle.unwrap());
        assert_pending!(outcome.poll());

        go.send(()).unwrap();
        let value = outcome.await;
        assert_eq!(value.unwrap(), 1);
        assert!(!toaster.get(&id).unwrap().bound);
    }

    #[tokio::test]
    async fn test_terminal_stays_on_binding_channel() {
        let toaster = immediate();
        let (chat, _chat_sub) = record(&toaster, "chat");
        let (default, _default_sub) = record(&toaster, "default");

        let options = PromiseOptions::<u32, String>::new()
            .channel("chat")
            .loading("Sending")
            .success("Sent");
        let handle = toaster
            .promise(async { Ok::<_, String>(1) }, Some(options))
            .unwrap()
            .unwrap();
        handle.unwrap().await.unwrap();

        assert_eq!(chat.lock().unwrap().len(), 2);
        assert!(default.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_without_loading_terminal_is_new_record() {
        let toaster = immediate();
        let (events, _sub) = record(&toaster, "default");

        let options = PromiseOptions::<u32, String>::new().success("Done");
        let handle = toaster
            .promise(async { Ok::<_, String>(1) }, Some(options))
            .unwrap()
            .unwrap();
        assert!(handle.id().is_none());
        handle.unwrap().await.unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(toast_of(&events[0]).kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn test_dismissed_while_pending_is_recreated() {
        let toaster = immediate();
        let (go, wait) = oneshot::channel::<()>();

        let options = PromiseOptions::<u32, String>::new()
            .loading("Waiting")
            .success("Done");
        let handle = toaster
            .promise(
                async move {
                    let _ = wait.await;
                    Ok::<_, String>(1)
                },
                Some(options),
            )
            .unwrap()
            .unwrap();
        let id = handle.id().cloned().unwrap();

        toaster.dismiss_id(id.clone());
        assert!(toaster.registry().is_dismissed(&id));

        go.send(()).unwrap();
        handle.unwrap().await.unwrap();

        assert!(toaster.registry().is_active(&id));
        assert_eq!(toaster.get(&id).unwrap().kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn test_out_of_order_settlement() {
        let toaster = immediate();
        let (first_go, first_wait) = oneshot::channel::<()>();

        let slow = toaster
            .promise(
                async move {
                    let _ = first_wait.await;
                    Ok::<_, String>(1)
                },
                Some(PromiseOptions::new().loading("Slow").success("Slow done")),
            )
            .unwrap()
            .unwrap();
        let fast = toaster
            .promise(
                async { Ok::<_, String>(2) },
                Some(PromiseOptions::new().loading("Fast").success("Fast done")),
            )
            .unwrap()
            .unwrap();
        let slow_id = slow.id().cloned().unwrap();
        let fast_id = fast.id().cloned().unwrap();

        fast.unwrap().await.unwrap();
        assert_eq!(toaster.get(&fast_id).unwrap().kind, ToastKind::Success);
        assert_eq!(toaster.get(&slow_id).unwrap().kind, ToastKind::Loading);

        first_go.send(()).unwrap();
        slow.unwrap().await.unwrap();
        assert_eq!(toaster.get(&slow_id).unwrap().kind, ToastKind::Success);

        let titles: Vec<_> = toaster.history().into_iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            vec![Some(Content::from("Slow done")), Some(Content::from("Fast done"))]
        );
    }
}
