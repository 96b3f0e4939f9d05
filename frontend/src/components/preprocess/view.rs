//! View rendering for the preprocessing workspace.
//!
//! The upload card is always shown. Once a dataset has been uploaded the
//! workspace below it opens with three tabs: "Data" (info panel and row
//! preview), "Preprocess" (the four column operations) and "Visualize" (chart
//! form and gallery). Nothing here mutates state; every input is turned into
//! a `Msg`.

use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::workbench::dispatcher::{OperationKind, OperationPhase};
use crate::workbench::feedback::FeedbackScope;
use crate::workbench::forms::{CHART_TYPES, ENCODING_METHODS, MISSING_METHODS, NORMALIZE_METHODS};
use crate::workbench::selector::Axis;
use crate::workbench::SelectorTarget;

use super::helpers::format_count;
use super::messages::Msg;
use super::state::{PreprocessComponent, TAB_DATA, TAB_PREPROCESS, TAB_VISUALIZE};

pub fn view(component: &PreprocessComponent, ctx: &Context<PreprocessComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div class="dataprep-root">
            { build_upload_card(component, link) }
            {
                if component.workbench.workspace_open() {
                    html! {
                        <>
                            { build_tab_bar(component, link) }
                            {
                                match component.active_tab.as_str() {
                                    TAB_PREPROCESS => build_preprocess_tab(component, link),
                                    TAB_VISUALIZE => build_visualize_tab(component, link),
                                    _ => build_data_tab(component, link),
                                }
                            }
                        </>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_upload_card(component: &PreprocessComponent, link: &Scope<PreprocessComponent>) -> Html {
    let on_change = link.callback(|e: Event| {
        let file = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        Msg::FileChosen(file)
    });
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Upload
    });

    html! {
        <div class="card mb-4">
            <div class="card-body">
                <h5 class="card-title">{ "Upload dataset" }</h5>
                <form id="uploadForm" onsubmit={on_submit}>
                    <input
                        type="file"
                        id="fileInput"
                        class="form-control"
                        accept=".csv,.xlsx,.xls"
                        ref={component.file_input_ref.clone()}
                        onchange={on_change}
                    />
                    <button type="submit" class="btn btn-primary mt-3">{ "Upload" }</button>
                    { loader(component, OperationKind::Upload) }
                </form>
                { feedback_alert(component, FeedbackScope::Upload) }
            </div>
        </div>
    }
}

fn build_tab_bar(component: &PreprocessComponent, link: &Scope<PreprocessComponent>) -> Html {
    let tab = |id: &'static str, label: &'static str| {
        let class = if component.active_tab == id {
            "nav-link active"
        } else {
            "nav-link"
        };
        html! {
            <li class="nav-item">
                <button class={class} onclick={link.callback(move |_| Msg::SetTab(id.to_string()))}>
                    { label }
                </button>
            </li>
        }
    };
    html! {
        <ul class="nav nav-tabs mb-3">
            { tab(TAB_DATA, "Data") }
            { tab(TAB_PREPROCESS, "Preprocess") }
            { tab(TAB_VISUALIZE, "Visualize") }
        </ul>
    }
}

fn build_data_tab(component: &PreprocessComponent, link: &Scope<PreprocessComponent>) -> Html {
    let workbench = &component.workbench;
    let info = match workbench.schema() {
        Some(schema) => html! {
            <div id="dataInfo">
                <p><strong>{ "File: " }</strong>{ schema.filename() }</p>
                <p><strong>{ "Rows: " }</strong>{ format_count(schema.row_count()) }</p>
                <p><strong>{ "Columns: " }</strong>{ schema.columns().len() }</p>
                <div class="mb-3">
                    { for schema.columns().iter().map(|column| html! {
                        <span class={classes!("column-badge", schema.column_type(column).as_str())}>
                            { column.clone() }
                        </span>
                    }) }
                </div>
            </div>
        },
        None => html! { <p class="text-muted">{ "No dataset loaded." }</p> },
    };

    html! {
        <div class="card">
            <div class="card-body">
                <h5 class="card-title">{ "Dataset information" }</h5>
                { info }
                { build_missing_table(component) }
                { build_preview_table(component) }
                <div class="d-flex gap-2 mt-3">
                    <button class="btn btn-outline-secondary" onclick={link.callback(|_| Msg::Refresh)}>
                        { "Reload" }
                    </button>
                    <button class="btn btn-success" onclick={link.callback(|_| Msg::Submit(OperationKind::Download))}>
                        { "Download" }
                    </button>
                    <button class="btn btn-danger" onclick={link.callback(|_| Msg::Submit(OperationKind::Reset))}>
                        { "Reset" }
                    </button>
                    { loader(component, OperationKind::Download) }
                    { loader(component, OperationKind::Reset) }
                </div>
            </div>
        </div>
    }
}

fn build_missing_table(component: &PreprocessComponent) -> Html {
    let preview = component.workbench.preview();
    if preview.missing.is_empty() {
        return html! {};
    }
    html! {
        <table class="table table-sm missing-table">
            <thead><tr><th>{ "Column" }</th><th>{ "Missing values" }</th></tr></thead>
            <tbody>
                { for preview.missing.iter().map(|(column, count)| html! {
                    <tr><td>{ column.clone() }</td><td>{ format_count(*count) }</td></tr>
                }) }
            </tbody>
        </table>
    }
}

fn build_preview_table(component: &PreprocessComponent) -> Html {
    let preview = component.workbench.preview();
    if preview.is_empty() {
        return html! {};
    }
    html! {
        <div class="table-responsive" id="dataPreview">
            <table class="table table-striped table-sm">
                <thead>
                    <tr>{ for preview.header.iter().map(|h| html! { <th>{ h.clone() }</th> }) }</tr>
                </thead>
                <tbody>
                    { for preview.rows.iter().map(|row| html! {
                        <tr>{ for row.iter().map(|cell| html! { <td>{ cell.clone() }</td> }) }</tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn build_preprocess_tab(component: &PreprocessComponent, link: &Scope<PreprocessComponent>) -> Html {
    let inputs = &component.workbench.inputs;
    html! {
        <div class="row g-3">
            { operation_card(component, link, SelectorTarget::MissingValues, "Handle missing values",
                method_select(link, SelectorTarget::MissingValues, MISSING_METHODS, &inputs.missing_method)) }
            { operation_card(component, link, SelectorTarget::Normalize, "Normalize",
                method_select(link, SelectorTarget::Normalize, NORMALIZE_METHODS, &inputs.normalize_method)) }
            { operation_card(component, link, SelectorTarget::Encoding, "Encode categorical",
                method_select(link, SelectorTarget::Encoding, ENCODING_METHODS, &inputs.encoding_method)) }
            { operation_card(component, link, SelectorTarget::DropColumns, "Drop columns", html! {}) }
        </div>
    }
}

fn operation_card(
    component: &PreprocessComponent,
    link: &Scope<PreprocessComponent>,
    target: SelectorTarget,
    title: &'static str,
    method: Html,
) -> Html {
    let kind = target.operation();
    let on_submit = link.callback(move |e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit(kind)
    });
    html! {
        <div class="col-md-6">
            <div class="card h-100">
                <div class="card-body">
                    <h5 class="card-title">{ title }</h5>
                    <form onsubmit={on_submit}>
                        { column_badges(component, link, target) }
                        { method }
                        <button type="submit" class="btn btn-primary mt-3">{ "Apply" }</button>
                        { loader(component, kind) }
                    </form>
                    { feedback_alert(component, kind.scope()) }
                </div>
            </div>
        </div>
    }
}

fn column_badges(
    component: &PreprocessComponent,
    link: &Scope<PreprocessComponent>,
    target: SelectorTarget,
) -> Html {
    let selector = component.workbench.selector(target);
    let schema = component.workbench.schema();
    if selector.columns().is_empty() {
        return html! { <p class="text-muted small">{ "No eligible columns." }</p> };
    }
    html! {
        <div class="column-list">
            { for selector.columns().iter().map(|column| {
                let type_class = schema.map(|s| s.column_type(column).as_str()).unwrap_or_default();
                let selected = selector.is_selected(column).then_some("selected");
                let name = column.clone();
                html! {
                    <span
                        class={classes!("column-badge", type_class, selected)}
                        onclick={link.callback(move |_| Msg::Toggle(target, name.clone()))}
                    >
                        { column.clone() }
                    </span>
                }
            }) }
        </div>
    }
}

fn method_select(
    link: &Scope<PreprocessComponent>,
    target: SelectorTarget,
    options: &'static [(&'static str, &'static str)],
    current: &str,
) -> Html {
    let on_change = link.callback(move |e: Event| {
        Msg::SetMethod(target, select_value(&e).unwrap_or_default())
    });
    html! {
        <select class="form-select mt-2" required={true} onchange={on_change}>
            <option value="" selected={current.is_empty()}>{ "Select a method" }</option>
            { for options.iter().map(|(value, label)| html! {
                <option value={*value} selected={current == *value}>{ *label }</option>
            }) }
        </select>
    }
}

fn build_visualize_tab(component: &PreprocessComponent, link: &Scope<PreprocessComponent>) -> Html {
    let inputs = &component.workbench.inputs;
    let on_chart_type = link.callback(|e: Event| Msg::SetChartType(select_value(&e).unwrap_or_default()));
    let on_title = link.callback(|e: InputEvent| {
        let title = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default();
        Msg::SetChartTitle(title)
    });
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit(OperationKind::Visualize)
    });

    html! {
        <div class="card">
            <div class="card-body">
                <h5 class="card-title">{ "Create visualization" }</h5>
                <form onsubmit={on_submit}>
                    <select class="form-select mb-2" required={true} onchange={on_chart_type}>
                        <option value="" selected={inputs.chart_type.is_empty()}>{ "Select a chart type" }</option>
                        { for CHART_TYPES.iter().map(|(value, label)| html! {
                            <option value={*value} selected={inputs.chart_type == *value}>{ *label }</option>
                        }) }
                    </select>
                    { axis_select(component, link, Axis::X, "X axis") }
                    { axis_select(component, link, Axis::Y, "Y axis (optional)") }
                    { axis_select(component, link, Axis::Hue, "Hue (optional)") }
                    <input
                        type="text"
                        class="form-control mb-2"
                        placeholder="Title (optional)"
                        value={inputs.chart_title.clone()}
                        oninput={on_title}
                    />
                    <button type="submit" class="btn btn-primary">{ "Create" }</button>
                    { loader(component, OperationKind::Visualize) }
                </form>
                { feedback_alert(component, FeedbackScope::Visualization) }
                <div class="gallery mt-3">
                    { for component.workbench.gallery().iter().map(|image| html! {
                        <img class="img-fluid mb-3" src={image.clone()} />
                    }) }
                </div>
            </div>
        </div>
    }
}

fn axis_select(
    component: &PreprocessComponent,
    link: &Scope<PreprocessComponent>,
    axis: Axis,
    placeholder: &'static str,
) -> Html {
    let axes = component.workbench.axes();
    let chosen = axes.chosen(axis);
    let on_change = link.callback(move |e: Event| {
        let column = select_value(&e).filter(|v| !v.is_empty());
        Msg::ChooseAxis(axis, column)
    });
    html! {
        <select class="form-select mb-2" onchange={on_change}>
            <option value="" selected={chosen.is_none()}>{ placeholder }</option>
            { for axes.columns().iter().map(|column| html! {
                <option value={column.clone()} selected={chosen == Some(column.as_str())}>{ column.clone() }</option>
            }) }
        </select>
    }
}

fn feedback_alert(component: &PreprocessComponent, scope: FeedbackScope) -> Html {
    match component.workbench.feedback(scope) {
        Some(feedback) => html! {
            <div
                id={format!("{}-feedback", scope.id())}
                class={format!("alert alert-{} mt-3", feedback.severity.as_str())}
                role="alert"
            >
                { feedback.message.clone() }
            </div>
        },
        None => html! {},
    }
}

fn loader(component: &PreprocessComponent, kind: OperationKind) -> Html {
    match component.workbench.phase(kind) {
        OperationPhase::Submitting => html! {
            <span class="spinner-border spinner-border-sm ms-2" role="status" />
        },
        OperationPhase::Idle => html! {},
    }
}

fn select_value(e: &Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
}
