use volsample_engine::shader::{compile, link_interface, StageSource, VOLUME_UNIFORM};

#[test]
fn embedded_program_links_with_volume_at_unit_zero() {
    let vs = compile(&StageSource::volume_vertex()).expect("vertex stage");
    let fs = compile(&StageSource::volume_fragment()).expect("fragment stage");

    let bindings = link_interface(&vs, &fs).expect("link");
    assert_eq!(bindings.group, 0);

    let volume = fs.resource_binding(VOLUME_UNIFORM).expect("uVolume is bound");
    assert_eq!(volume.binding, bindings.texture);
}
