//! Update function for the preprocessing workspace.
//!
//! Every message is handed to the `Workbench`; this module only starts the
//! requests it asks for and routes their results back as messages. After
//! each message, freshly shown feedback gets a dismiss timer.

use gloo_file::{futures::read_as_bytes, Blob};
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;

use crate::api::{DatasetFile, DatasetService};
use crate::workbench::dispatcher::{self, FollowUp, OperationKind, OperationRequest};
use crate::workbench::SelectorTarget;

use super::helpers::deliver_download;
use super::messages::Msg;
use super::state::PreprocessComponent;

/// Returns `true` when the view should re-render.
pub fn update(
    component: &mut PreprocessComponent,
    ctx: &Context<PreprocessComponent>,
    msg: Msg,
) -> bool {
    let render = handle(component, ctx, msg);
    schedule_dismissals(component, ctx);
    render
}

fn handle(
    component: &mut PreprocessComponent,
    ctx: &Context<PreprocessComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::SetTab(tab) => {
            component.active_tab = tab;
            true
        }
        Msg::FileChosen(file) => {
            component.selected_file = file;
            false
        }
        Msg::Upload => {
            match component.selected_file.clone() {
                Some(file) => read_file(ctx, file),
                // Reports "Please select a file".
                None => {
                    let _ = component.workbench.prepare_upload(None);
                }
            }
            true
        }
        Msg::FileRead(Ok(file)) => {
            if let Ok(request) = component.workbench.prepare_upload(Some(file)) {
                send(component, ctx, request);
            }
            true
        }
        Msg::FileRead(Err(e)) => {
            let _ = component.workbench.complete(OperationKind::Upload, Err(e));
            true
        }
        Msg::Toggle(target, column) => {
            component.workbench.toggle(target, &column);
            true
        }
        Msg::SetMethod(target, method) => {
            let inputs = &mut component.workbench.inputs;
            match target {
                SelectorTarget::MissingValues => inputs.missing_method = method,
                SelectorTarget::Normalize => inputs.normalize_method = method,
                SelectorTarget::Encoding => inputs.encoding_method = method,
                SelectorTarget::DropColumns => return false,
            }
            false
        }
        Msg::SetChartType(chart_type) => {
            component.workbench.inputs.chart_type = chart_type;
            false
        }
        Msg::SetChartTitle(title) => {
            component.workbench.inputs.chart_title = title;
            false
        }
        Msg::ChooseAxis(axis, column) => {
            component.workbench.choose_axis(axis, column);
            true
        }
        Msg::Submit(kind) => {
            if let Ok(request) = component.workbench.prepare(kind) {
                send(component, ctx, request);
            }
            true
        }
        Msg::Completed(kind, result) => {
            match component.workbench.complete(kind, result) {
                Ok(FollowUp::Refresh) => start_refresh(component, ctx),
                Ok(FollowUp::Deliver(file)) => deliver_download(&file),
                Ok(FollowUp::Nothing) | Err(_) => {}
            }
            true
        }
        Msg::Refresh => {
            start_refresh(component, ctx);
            false
        }
        Msg::Refreshed(ticket, result) => {
            let outcome = component.workbench.finish_refresh(ticket, result);
            log::debug!("refresh finished: {:?}", outcome);
            true
        }
        Msg::DismissFeedback(ticket) => component.workbench.expire_feedback(ticket),
    }
}

fn read_file(ctx: &Context<PreprocessComponent>, file: web_sys::File) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let name = file.name();
        let blob = Blob::from(file);
        let result = read_as_bytes(&blob)
            .await
            .map(|bytes| DatasetFile { name, bytes })
            .map_err(|e| ApiError::Transport(format!("cannot read the file: {}", e)));
        link.send_message(Msg::FileRead(result));
    });
}

fn send(
    component: &PreprocessComponent,
    ctx: &Context<PreprocessComponent>,
    request: OperationRequest,
) {
    let kind = request.kind();
    let service = component.service.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = dispatcher::execute(service.as_ref(), &request).await;
        link.send_message(Msg::Completed(kind, result));
    });
}

fn start_refresh(component: &mut PreprocessComponent, ctx: &Context<PreprocessComponent>) {
    let ticket = component.workbench.begin_refresh();
    let service = component.service.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = service.preview().await;
        link.send_message(Msg::Refreshed(ticket, result));
    });
}

fn schedule_dismissals(component: &mut PreprocessComponent, ctx: &Context<PreprocessComponent>) {
    let delay = component.config.feedback_dismiss_ms;
    for ticket in component.workbench.take_dismissals() {
        let link = ctx.link().clone();
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            link.send_message(Msg::DismissFeedback(ticket));
        });
    }
}
