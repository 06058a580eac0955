//! `io.github.crow_misia.mediasoup.Consumer` natives

string_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetId, consumer_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetLocalId, consumer_local_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetProducerId, consumer_producer_id);
bool_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeIsClosed, consumer_is_closed, true);
string_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetKind, consumer_kind);
pointer_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetRtpReceiver, consumer_rtp_receiver);
pointer_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetTrack, consumer_track);
string_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetRtpParameters, consumer_rtp_parameters);
bool_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeIsPaused, consumer_is_paused, false);
string_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetAppData, consumer_app_data);
void_op!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeClose, consumer_close);
string_getter!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeGetStats, consumer_stats);
void_op!(Java_io_github_crow_1misia_mediasoup_Consumer_nativePause, consumer_pause);
void_op!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeResume, consumer_resume);
dispose_op!(Java_io_github_crow_1misia_mediasoup_Consumer_nativeDispose, dispose_consumer);
